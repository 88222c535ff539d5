use std::{hint::black_box, sync::Arc, time::Duration};

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use ngram_langid::{
    Backend, Detector, LanguageProfile, ProfileRegistry, ngram::extract_ngrams,
};

const CORPORA: &[(&str, &str)] = &[
    (
        "en",
        "the quick brown fox jumps over the lazy dog while the children watch \
         from the window and their mother prepares dinner in the kitchen",
    ),
    (
        "fr",
        "le renard brun rapide saute par dessus le chien paresseux pendant que \
         les enfants regardent par la fenetre et leur mere prepare le diner",
    ),
    (
        "de",
        "der schnelle braune fuchs springt ueber den faulen hund waehrend die \
         kinder aus dem fenster schauen und ihre mutter das essen kocht",
    ),
    (
        "nl",
        "de snelle bruine vos springt over de luie hond terwijl de kinderen \
         uit het raam kijken en hun moeder het eten klaarmaakt",
    ),
];

/// Profile holding every 1-, 2- and 3-gram of `text`.
fn profile_from_corpus(name: &str, text: &str) -> LanguageProfile {
    let mut profile = LanguageProfile::new(name);
    for gram in extract_ngrams(text, |_| true) {
        profile.n_words[gram.chars().count() - 1] += 1;
        *profile.freq.entry(gram).or_default() += 1;
    }
    profile
}

fn registry() -> Arc<ProfileRegistry> {
    let profiles = CORPORA
        .iter()
        .map(|&(name, text)| profile_from_corpus(name, text));
    Arc::new(ProfileRegistry::new(profiles).expect("corpus names are distinct"))
}

fn english_text(words: usize) -> String {
    CORPORA[0]
        .1
        .split_whitespace()
        .cycle()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}

fn detect_benches(c: &mut Criterion) {
    let registry = registry();
    let mut group = c.benchmark_group("detect");
    group.measurement_time(Duration::from_secs(5));

    for words in [20, 100, 1000] {
        let text = english_text(words);
        for backend in [Backend::Reference, Backend::Flat] {
            let id = BenchmarkId::new(format!("{backend:?}"), words);
            group.bench_with_input(id, &text, |b, text| {
                b.iter_batched(
                    || {
                        Detector::builder(Arc::clone(&registry))
                            .seed(7)
                            .backend(backend)
                            .build()
                    },
                    |mut detector| {
                        detector.append(text);
                        black_box(detector.detect().expect("english text has features"))
                    },
                    BatchSize::SmallInput,
                );
            });
        }

        let id = BenchmarkId::new("Flat+parallel", words);
        group.bench_with_input(id, &text, |b, text| {
            let mut detector = Detector::builder(Arc::clone(&registry))
                .seed(7)
                .backend(Backend::Flat)
                .parallel_trials(true)
                .build();
            detector.append(text);
            b.iter(|| {
                // new alpha drops the cached estimate
                detector.set_alpha(0.5);
                black_box(detector.detect().expect("english text has features"))
            });
        });
    }
    group.finish();
}

fn preprocess_benches(c: &mut Criterion) {
    let registry = registry();
    let text = english_text(1000);
    c.bench_function("append/1000 words", |b| {
        b.iter_batched(
            || Detector::builder(Arc::clone(&registry)).seed(1).build(),
            |mut detector| {
                detector.append(black_box(&text));
                black_box(detector.text().len())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, detect_benches, preprocess_benches);
criterion_main!(benches);
