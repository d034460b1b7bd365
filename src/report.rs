//! Presentation-ready results of evaluated blocks, independent of any specific chat service.

use crate::{
	block::EvaledBlock,
	term::{EvaledTerm, Quality},
};

/// Everything a presentation layer needs to show the result of one block
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct BlockReport {
	/// Whether the block was marked `mini`, in which case [`Self::diagnostics`] is empty
	pub compact: bool,

	/// Final total of the block
	pub total: i64,

	/// Summary with markdown emphasis, e.g. `*7* × *2* for *fire* = *14*`
	pub summary: String,

	/// Plain text equivalent of the summary, e.g. `7 * 2 for fire = 14`
	pub fallback: String,

	/// Details for each rolled (non-literal) term, in order
	pub diagnostics: Vec<TermDiagnostics>,

	/// Classification of the block's last rolled term
	pub quality: Option<Quality>,
}

impl BlockReport {
	/// Builds the report for an evaluated block.
	///
	/// # Examples
	/// ```
	/// use dicebot::{dice::roller::Val as ValRoller, parse, report::BlockReport};
	///
	/// let cmd = parse::command("2d6 * 2 for fire");
	/// let evaled = cmd.blocks[0].eval(&mut ValRoller(4))?;
	/// let report = BlockReport::new(&evaled);
	/// assert_eq!(report.total, 16);
	/// assert_eq!(report.summary, "*8* × *2* for *fire* = *16*");
	/// assert_eq!(report.fallback, "8 * 2 for fire = 16");
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	#[must_use]
	pub fn new(evaled: &EvaledBlock) -> Self {
		let running = evaled.running_totals();
		let mut summary = String::new();
		let mut fallback = String::new();

		for (i, (term, running)) in evaled.terms.iter().zip(&running).enumerate() {
			if i == 0 {
				summary.push_str(&format!("*{running}*"));
				fallback.push_str(&running.to_string());
			} else {
				let total = term.total();
				summary.push_str(&format!(" {} *{total}*", term.term.op.display_symbol()));
				fallback.push_str(&format!(" {} {total}", term.term.op.symbol()));
			}

			if let Some(label) = &term.term.label {
				summary.push_str(&format!(" for *{label}*"));
				fallback.push_str(&format!(" for {label}"));
			}
		}

		let total = evaled.total();
		if evaled.terms.len() > 1 {
			summary.push_str(&format!(" = *{total}*"));
			fallback.push_str(&format!(" = {total}"));
		}

		let compact = evaled.block.mini;
		let diagnostics = if compact {
			Vec::new()
		} else {
			evaled.terms.iter().filter_map(TermDiagnostics::new).collect()
		};

		Self {
			compact,
			total,
			summary,
			fallback,
			diagnostics,
			quality: evaled.quality(),
		}
	}
}

/// Details about the individual rolls of a single rolled term
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub struct TermDiagnostics {
	/// Short dice notation, e.g. `2d6` or `4df`
	pub dice: String,

	/// Rolls counted in the total (ascending if any were dropped, otherwise in roll order)
	pub rolls: Vec<i32>,

	/// Minimum threshold and the number of kept rolls over it
	pub over: Option<(u32, usize)>,

	/// Maximum threshold and the number of kept rolls under it
	pub under: Option<(u32, usize)>,

	/// Keep count and the rolls that were dropped because of it (ascending)
	pub keep: Option<(i32, Vec<i32>)>,
}

impl TermDiagnostics {
	/// Builds the diagnostics of an evaluated term. Literal numbers have none.
	#[must_use]
	pub fn new(evaled: &EvaledTerm) -> Option<Self> {
		let dice = &evaled.term.dice;
		if dice.is_literal() {
			return None;
		}

		let rolled = &evaled.rolled;
		let mut rolls = rolled.kept().map(|roll| roll.val).collect::<Vec<_>>();
		let keep = (dice.keep != 0).then(|| {
			rolls.sort_unstable();
			let mut removed = rolled.removed().map(|roll| roll.val).collect::<Vec<_>>();
			removed.sort_unstable();
			(dice.keep, removed)
		});

		let count = rolled.threshold_count().unwrap_or(0);
		Some(Self {
			dice: dice.notation(),
			rolls,
			over: dice.min_threshold().map(|min| (min, count)),
			under: dice.max_threshold().map(|max| (max, count)),
			keep,
		})
	}

	/// Flattens the diagnostics into titled fields, in pairs: Dice/Rolls, then Minimum/Over, Maximum/Under, and
	/// Keep/Removed where they apply.
	///
	/// # Examples
	/// ```
	/// use dicebot::{dice::roller::Iter as IterRoller, parse, report::{Field, TermDiagnostics}};
	///
	/// let term = &parse::terms("3d6k2")[0];
	/// let evaled = term.eval(&mut IterRoller::new([5, 1, 3]))?;
	/// let fields = TermDiagnostics::new(&evaled).unwrap().fields();
	/// assert_eq!(
	/// 	fields,
	/// 	vec![
	/// 		Field::new("Dice", "3d6"),
	/// 		Field::new("Rolls", "3 5"),
	/// 		Field::new("Keep", "2"),
	/// 		Field::new("Removed", "1"),
	/// 	]
	/// );
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	#[must_use]
	pub fn fields(&self) -> Vec<Field> {
		let mut fields = vec![Field::new("Dice", &self.dice), Field::new("Rolls", join(&self.rolls))];
		if let Some((min, count)) = self.over {
			fields.push(Field::new("Minimum", min.to_string()));
			fields.push(Field::new("Over", count.to_string()));
		}
		if let Some((max, count)) = self.under {
			fields.push(Field::new("Maximum", max.to_string()));
			fields.push(Field::new("Under", count.to_string()));
		}
		if let Some((keep, removed)) = &self.keep {
			fields.push(Field::new("Keep", keep.to_string()));
			fields.push(Field::new("Removed", join(removed)));
		}
		fields
	}
}

/// A titled value to show alongside a result
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[expect(clippy::exhaustive_structs, reason = "Mirrors the chat field format")]
pub struct Field {
	/// Title of the field
	pub title: String,

	/// Value of the field
	pub value: String,

	/// Whether the field is short enough to be shown side by side with another
	pub short: bool,
}

impl Field {
	/// Creates a new short field.
	#[must_use]
	pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			title: title.into(),
			value: value.into(),
			short: true,
		}
	}
}

/// Joins roll values with spaces.
fn join(vals: &[i32]) -> String {
	vals.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}
