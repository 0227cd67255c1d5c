//! Small helpers shared across commands.

pub mod path;
pub mod slug;

/// Return "s" suffix for plural counts.
#[inline]
pub const fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
