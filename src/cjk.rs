//! Process-wide CJK ideograph folding table.
//!
//! Rare and variant ideographs fold onto a smaller set of representatives so
//! they share n-gram statistics. The table is built once, on first use or by
//! an explicit [`install_classes`] call, and is read-only afterwards.

use std::{collections::HashMap, sync::OnceLock};

use thiserror::Error;

use crate::data::CJK_SEED_CLASSES;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CjkTableError {
    #[error("CJK class table is already initialized")]
    AlreadyInitialized,
}

static CJK_TABLE: OnceLock<HashMap<char, char>> = OnceLock::new();

/// Build a folding table from symbol classes. The first member of every class
/// is its representative; every member, the representative included, maps to
/// it. A character keeps its first assignment, so the table stays idempotent
/// when classes overlap.
pub fn build_table<I, S>(classes: I) -> HashMap<char, char>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = HashMap::new();
    for class in classes {
        let class = class.as_ref();
        let mut members = class.chars();
        let Some(first) = members.next() else {
            continue;
        };
        let representative = *table.entry(first).or_insert(first);
        if representative != first {
            tracing::warn!(
                representative = %first,
                resolved = %representative,
                "CJK class representative already belongs to an earlier class"
            );
        }
        for member in members {
            table.entry(member).or_insert(representative);
        }
    }
    table
}

/// Install the complete class table. Must run before the first call to
/// [`fold`]; afterwards the table is frozen.
pub fn install_classes<I, S>(classes: I) -> Result<(), CjkTableError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if CJK_TABLE.get().is_some() {
        return Err(CjkTableError::AlreadyInitialized);
    }
    let table = build_table(classes);
    let size = table.len();
    CJK_TABLE
        .set(table)
        .map_err(|_| CjkTableError::AlreadyInitialized)?;
    tracing::debug!(size, "installed CJK class table");
    Ok(())
}

#[inline]
fn table() -> &'static HashMap<char, char> {
    CJK_TABLE.get_or_init(|| build_table(CJK_SEED_CLASSES.iter()))
}

/// Representative of `c`, or `c` itself when it belongs to no class.
#[inline]
pub fn fold(c: char) -> char {
    table().get(&c).copied().unwrap_or(c)
}
