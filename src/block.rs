//! Blocks of terms that are evaluated independently, and the commands made up of them.

use std::fmt;

use crate::{
	dice::{roller::Roller, Error},
	report::BlockReport,
	term::{EvaledTerm, Operator, Quality, Term},
};

/// Maximum number of blocks in a single command
pub const MAX_BLOCKS: usize = 5;

/// One independently evaluated expression within a command, such as `mini 1d20>15 for attack`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Built directly from parsed segments")]
pub struct Block {
	/// Whether the block was marked with `mini`/`m`, hiding detailed diagnostics when presenting its result
	pub mini: bool,

	/// Terms to fold together, in order
	pub terms: Vec<Term>,
}

impl Block {
	/// Rolls every term of the block, in order.
	///
	/// # Errors
	/// If the roller fails to produce a roll, an error variant is returned.
	pub fn eval(&self, rng: &mut impl Roller) -> Result<EvaledBlock<'_>, Error> {
		let terms = self
			.terms
			.iter()
			.map(|term| term.eval(rng))
			.collect::<Result<Vec<_>, _>>()?;

		Ok(EvaledBlock { block: self, terms })
	}
}

impl fmt::Display for Block {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.mini {
			write!(f, "mini ")?;
		}
		write!(
			f,
			"{}",
			self.terms.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
		)
	}
}

/// A [`Block`] after all of its terms have been rolled
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Plain pairing of a block and its results")]
pub struct EvaledBlock<'a> {
	/// Block that was evaluated
	pub block: &'a Block,

	/// Evaluated terms, in the same order as the block's terms
	pub terms: Vec<EvaledTerm<'a>>,
}

impl EvaledBlock<'_> {
	/// Lists the running total after each term has been folded in.
	///
	/// The first term starts the running total (negated if its operator is a subtraction, and otherwise taken as-is
	/// regardless of its operator). Every other term is combined using [`Operator::apply()`].
	#[must_use]
	pub fn running_totals(&self) -> Vec<i64> {
		let mut totals = Vec::with_capacity(self.terms.len());
		let mut terms = self.terms.iter();

		if let Some(first) = terms.next() {
			let mut running = match first.term.op {
				Operator::Sub => first.total().saturating_neg(),
				_ => first.total(),
			};
			totals.push(running);

			for term in terms {
				running = term.term.op.apply(running, term.total());
				totals.push(running);
			}
		}

		totals
	}

	/// Calculates the final total of the block.
	///
	/// # Examples
	/// ```
	/// use dicebot::{dice::{roller::Val as ValRoller, Dice}, term::{Operator, Term}, Block};
	///
	/// let block = Block {
	/// 	mini: false,
	/// 	terms: vec![
	/// 		Term::new(Operator::Sub, Dice::new(2, 6)),
	/// 		Term::new(Operator::Mul, Dice::literal(3)),
	/// 	],
	/// };
	/// assert_eq!(block.eval(&mut ValRoller(2))?.total(), -12);
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	#[must_use]
	pub fn total(&self) -> i64 {
		self.running_totals().last().copied().unwrap_or(0)
	}

	/// Gets the classification of the last classifiable term in the block.
	#[must_use]
	pub fn quality(&self) -> Option<Quality> {
		self.terms.iter().rev().find_map(EvaledTerm::quality)
	}
}

/// The full set of blocks parsed from a single piece of command text
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Only ever a list of blocks")]
pub struct Command {
	/// Blocks to evaluate independently (never more than [`MAX_BLOCKS`])
	pub blocks: Vec<Block>,
}

impl Command {
	/// Rolls every block of the command.
	///
	/// # Errors
	/// If the roller fails to produce a roll, an error variant is returned.
	pub fn eval(&self, rng: &mut impl Roller) -> Result<Vec<EvaledBlock<'_>>, Error> {
		self.blocks.iter().map(|block| block.eval(rng)).collect()
	}

	/// Rolls every block of the command and builds a report for each of them.
	///
	/// # Errors
	/// If the roller fails to produce a roll, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use dicebot::{dice::roller::Max as MaxRoller, parser};
	///
	/// let reports = parser("2d6+3, mini 4df").report(&mut MaxRoller)?;
	/// assert_eq!(reports.len(), 2);
	/// assert_eq!(reports[0].total, 15);
	/// assert_eq!(reports[1].total, 4);
	/// assert!(reports[1].diagnostics.is_empty());
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	pub fn report(&self, rng: &mut impl Roller) -> Result<Vec<BlockReport>, Error> {
		Ok(self.eval(rng)?.iter().map(BlockReport::new).collect())
	}
}

impl fmt::Display for Command {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}",
			self.blocks.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
		)
	}
}
