#![doc = pretty_readme::docify!("README.md", "https://docs.rs/dicebot/latest/dicebot/", "./")]
#![expect(
	clippy::tabs_in_doc_comments,
	reason = "Consistency with source, user-configurability & accessibility"
)]
#![deny(macro_use_extern_crate, meta_variable_misuse, unit_bindings)]
#![warn(
	explicit_outlives_requirements,
	missing_docs,
	missing_debug_implementations,
	unreachable_pub,
	unused_crate_dependencies,
	unused_qualifications,
	clippy::pedantic,
	clippy::absolute_paths,
	clippy::allow_attributes_without_reason,
	clippy::clone_on_ref_ptr,
	clippy::cognitive_complexity,
	clippy::dbg_macro,
	clippy::empty_enum_variants_with_brackets,
	clippy::empty_structs_with_brackets,
	clippy::exhaustive_enums,
	clippy::exhaustive_structs,
	clippy::exit,
	clippy::expect_used,
	clippy::get_unwrap,
	clippy::if_then_some_else_none,
	clippy::infinite_loop,
	clippy::map_err_ignore,
	clippy::missing_docs_in_private_items,
	clippy::multiple_inherent_impl,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::print_stderr,
	clippy::print_stdout,
	clippy::redundant_type_annotations,
	clippy::ref_patterns,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::tests_outside_test_module,
	clippy::try_err,
	clippy::unnecessary_self_imports,
	clippy::unneeded_field_pattern,
	clippy::unused_result_ok,
	clippy::unwrap_in_result,
	clippy::unwrap_used
)]

pub mod block;
pub mod dice;
pub mod parse;
pub mod report;
#[cfg(feature = "slack")]
pub mod slack;
pub mod term;

pub use block::{Block, Command};
pub use dice::Dice;
pub use parse::command as parser;
pub use report::BlockReport;
pub use term::Term;

use dice::roller::OsRand;

#[cfg(test)]
mod tests;

#[cfg(feature = "build-binary")]
use ariadne as _;
#[cfg(feature = "build-binary")]
use serde_json as _;
#[cfg(feature = "build-binary")]
use tracing_subscriber as _;
#[cfg(all(test, not(feature = "slack")))]
use serde_json as _;

/// Parses command text and rolls it with the operating system's secure random source.
///
/// # Errors
/// If the random source fails, an error variant is returned.
///
/// # Examples
/// ```
/// let reports = dicebot::roll("1d20 for initiative")?;
/// assert_eq!(reports.len(), 1);
/// assert!((1..=20).contains(&reports[0].total));
/// # Ok::<(), dicebot::dice::Error>(())
/// ```
pub fn roll(text: &str) -> Result<Vec<BlockReport>, dice::Error> {
	parse::command(text).report(&mut OsRand)
}
