//! Terms: single dice rolls or numbers that are chained onto a block's running total with an operator.

use std::fmt;

use crate::dice::{roller::Roller, Dice, Error, Rolled};

/// Operation that combines a term's total with the running total of its block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[expect(clippy::exhaustive_enums, reason = "Matches the fixed set of operator symbols in the notation")]
pub enum Operator {
	/// Adds the term's total. Symbol: `+` (also the default when no operator is given)
	#[default]
	Add,

	/// Subtracts the term's total. Symbol: `-`
	Sub,

	/// Multiplies by the term's total. Symbol: `*` or `×`
	Mul,

	/// Integer division by the term's total. Symbol: `/`
	Div,

	/// Replaces the running total with the term's total if that's higher. Symbol: `^`
	Max,

	/// Replaces the running total with the term's total if that's lower. Symbol: `v`
	Min,
}

impl Operator {
	/// Combines a running total with a term's total.
	///
	/// Sums and products saturate instead of overflowing. A division that can't be performed (by zero, or overflowing)
	/// leaves the running total untouched.
	///
	/// # Examples
	/// ```
	/// use dicebot::term::Operator;
	///
	/// assert_eq!(Operator::Div.apply(7, 2), 3);
	/// assert_eq!(Operator::Div.apply(7, 0), 7);
	/// assert_eq!(Operator::Max.apply(3, 5), 5);
	/// assert_eq!(Operator::Min.apply(3, 5), 3);
	/// ```
	#[must_use]
	pub fn apply(self, acc: i64, val: i64) -> i64 {
		match self {
			Self::Add => acc.saturating_add(val),
			Self::Sub => acc.saturating_sub(val),
			Self::Mul => acc.saturating_mul(val),
			Self::Div => acc.checked_div(val).unwrap_or_else(|| {
				log::warn!("ignoring division of {acc} by {val}");
				acc
			}),
			Self::Max => acc.max(val),
			Self::Min => acc.min(val),
		}
	}

	/// Gets the plain-text symbol of the operator.
	#[must_use]
	pub const fn symbol(self) -> &'static str {
		match self {
			Self::Add => "+",
			Self::Sub => "-",
			Self::Mul => "*",
			Self::Div => "/",
			Self::Max => "^",
			Self::Min => "v",
		}
	}

	/// Gets the symbol of the operator for rich text, where multiplication reads better as `×`.
	#[must_use]
	pub const fn display_symbol(self) -> &'static str {
		match self {
			Self::Mul => "×",
			_ => self.symbol(),
		}
	}
}

impl fmt::Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.symbol())
	}
}

/// A single dice roll or number within a block, along with the operator used to combine it and an optional label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Every part of the notation is already represented")]
pub struct Term {
	/// Operator that combines this term with the running total
	pub op: Operator,

	/// Dice to roll (or literal number)
	pub dice: Dice,

	/// Free-text annotation, such as "fire" from `2d6 for fire`
	pub label: Option<String>,
}

impl Term {
	/// Creates a new unlabelled term.
	#[must_use]
	pub const fn new(op: Operator, dice: Dice) -> Self {
		Self { op, dice, label: None }
	}

	/// Attaches a label to the term.
	#[must_use]
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Rolls the term's dice. Every call produces a brand new, independent result.
	///
	/// # Errors
	/// If the roller fails to produce a roll, an error variant is returned.
	pub fn eval(&self, rng: &mut impl Roller) -> Result<EvaledTerm<'_>, Error> {
		Ok(EvaledTerm {
			term: self,
			rolled: rng.roll(&self.dice, true)?,
		})
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.op, self.dice)?;
		if let Some(label) = &self.label {
			write!(f, " for {label}")?;
		}
		Ok(())
	}
}

/// A [`Term`] after its dice have been rolled
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain pairing of a term and its results")]
pub struct EvaledTerm<'a> {
	/// Term that was evaluated
	pub term: &'a Term,

	/// Result of rolling the term's dice
	pub rolled: Rolled<'a>,
}

impl EvaledTerm<'_> {
	/// Total of the term after any dice were dropped.
	#[must_use]
	#[inline]
	pub fn total(&self) -> i64 {
		self.rolled.total()
	}

	/// Classifies how good the roll was relative to what the dice could have rolled.
	/// Literal numbers aren't classified.
	///
	/// # Examples
	/// ```
	/// use dicebot::{dice::{roller::Val as ValRoller, Dice}, term::{Operator, Quality, Term}};
	///
	/// let term = Term::new(Operator::Add, Dice::new(2, 6));
	/// assert_eq!(term.eval(&mut ValRoller(6))?.quality(), Some(Quality::Favorable));
	/// assert_eq!(term.eval(&mut ValRoller(3))?.quality(), Some(Quality::Neutral));
	/// assert_eq!(term.eval(&mut ValRoller(1))?.quality(), Some(Quality::Unfavorable));
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	#[must_use]
	pub fn quality(&self) -> Option<Quality> {
		let dice = &self.term.dice;
		if dice.is_literal() {
			return None;
		}

		let total = self.total();
		if dice.fudge {
			return Some(match total {
				1.. => Quality::Favorable,
				0 => Quality::Neutral,
				_ => Quality::Unfavorable,
			});
		}

		let count = i64::from(dice.count);
		let third = count * i64::from(dice.sides) / 3;
		Some(if total > third * 2 {
			Quality::Favorable
		} else if total > third + count - 1 {
			Quality::Neutral
		} else {
			Quality::Unfavorable
		})
	}
}

/// How a roll turned out, for picking a presentation color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
#[expect(clippy::exhaustive_enums, reason = "Three-way classification")]
pub enum Quality {
	/// Upper third of the possible range (or a positive fudge total)
	Favorable,

	/// Middle of the range (or a zero fudge total)
	Neutral,

	/// Lower third of the range (or a negative fudge total)
	Unfavorable,
}

impl Quality {
	/// Gets the chat attachment color conventionally used for the quality.
	#[must_use]
	pub const fn color(self) -> &'static str {
		match self {
			Self::Favorable => "good",
			Self::Neutral => "warning",
			Self::Unfavorable => "danger",
		}
	}
}
