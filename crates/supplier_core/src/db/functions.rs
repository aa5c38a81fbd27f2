//! Supplier normalization exposed as SQL scalar functions.
//!
//! SQLite's `lower()` only folds ASCII, `trim()` only strips spaces and it
//! has no digit filter, so the uniqueness prefilter calls these instead.
//! They delegate to the same normalizers the in-process guard uses.

use crate::repo::uniqueness::{normalize_phone, normalize_tax_id, normalize_text};
use rusqlite::functions::{Context, FunctionFlags};
use rusqlite::Connection;

/// `supplier_fold_text(x)`: trimmed, case-folded text or NULL when blank.
pub const FOLD_TEXT_FN: &str = "supplier_fold_text";
/// `supplier_digits(x)`: digits of `x` or NULL when there are none.
pub const DIGITS_FN: &str = "supplier_digits";
/// `supplier_tax_id(x)`: `x` without surrounding whitespace or NULL when blank.
pub const TAX_ID_FN: &str = "supplier_tax_id";

/// Registers supplier SQL functions on `conn`. Re-registering is harmless.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;
    conn.create_scalar_function(FOLD_TEXT_FN, 1, flags, |ctx| {
        Ok(text_arg(ctx)?.as_deref().and_then(normalize_text))
    })?;
    conn.create_scalar_function(DIGITS_FN, 1, flags, |ctx| {
        Ok(text_arg(ctx)?.as_deref().and_then(normalize_phone))
    })?;
    conn.create_scalar_function(TAX_ID_FN, 1, flags, |ctx| {
        Ok(text_arg(ctx)?.as_deref().and_then(normalize_tax_id))
    })?;
    Ok(())
}

fn text_arg(ctx: &Context<'_>) -> rusqlite::Result<Option<String>> {
    ctx.get::<Option<String>>(0)
}
