//! Parsing of free-form command text into [`Command`]s.
//!
//! Parsing happens in three steps, each of which is usable on its own:
//! 1. [`segments()`] splits command text into at most [`MAX_BLOCKS`] segments on `,`/`;`, picking up any leading
//!    `mini `/`m ` marker.
//! 2. [`term_match()`] is the grammar for a single term. [`scan()`] runs it repeatedly over a segment, skipping any
//!    text where no term starts, and produces raw [`TermMatch`]es exactly as they were written.
//! 3. [`TermMatch::resolve()`] clamps and defaults the raw values into a [`Term`], and [`block()`] applies the
//!    default-term policy to the resolved terms.
//!
//! None of this can fail: text that doesn't look like dice is simply skipped.

use std::ops::Range;

use chumsky::prelude::*;

use crate::{
	block::{Block, Command, MAX_BLOCKS},
	dice::{modifier::Condition, Dice, MAX_COUNT, MAX_SIDES},
	term::{Operator, Term},
};

/// Maximum number of terms parsed from a single block
pub const MAX_TERMS: usize = 5;

/// Parser extras used by every grammar in this module
type Extra<'src> = extra::Err<Rich<'src, char>>;

/// A term match and its byte range, or the byte range of a skipped character
type Scanned = Result<(TermMatch, Range<usize>), Range<usize>>;

/// Size token of a dice term, as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(clippy::exhaustive_enums, reason = "Matches the grammar")]
pub enum SidesToken {
	/// `f`/`F`: fudge dice
	Fudge,

	/// `%`: percentile dice
	Percent,

	/// Explicit number of sides
	Num(u32),
}

/// Body of a term match, as written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(clippy::exhaustive_enums, reason = "Matches the grammar")]
pub enum Shape {
	/// `[count]d<sides>[!][<>n][k[-]n]`
	Dice {
		/// Number of dice (`None` when omitted, as in `d20`)
		count: Option<u32>,

		/// Size token
		sides: SidesToken,

		/// Whether `!` was given
		explode: bool,

		/// Threshold comparison (`>` or `<`) and its value
		threshold: Option<(char, u32)>,

		/// Signed keep count
		keep: Option<i32>,
	},

	/// `<number>[f]`
	Literal {
		/// The number
		val: u32,

		/// Whether it was suffixed with `f` (roll that many fudge dice)
		fudge: bool,
	},
}

/// A single term as written in the text, before any clamping or defaulting
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Matches the grammar")]
pub struct TermMatch {
	/// Operator, if one was given
	pub op: Option<Operator>,

	/// Dice or literal body
	pub shape: Shape,

	/// Text after ` for `, if any
	pub label: Option<String>,
}

impl TermMatch {
	/// Indicates whether the match is a genuine dice roll (it has a size token or is a fudge roll) rather than a plain
	/// number.
	#[must_use]
	pub const fn is_roll(&self) -> bool {
		match self.shape {
			Shape::Dice { .. } => true,
			Shape::Literal { fudge, .. } => fudge,
		}
	}

	/// Clamps and defaults the raw match into a [`Term`].
	///
	/// # Examples
	/// ```
	/// use dicebot::{dice::Dice, parse::{SidesToken, Shape, TermMatch}, term::{Operator, Term}};
	///
	/// let raw = TermMatch {
	/// 	op: None,
	/// 	shape: Shape::Dice {
	/// 		count: Some(999),
	/// 		sides: SidesToken::Num(9999),
	/// 		explode: false,
	/// 		threshold: None,
	/// 		keep: None,
	/// 	},
	/// 	label: None,
	/// };
	/// assert_eq!(raw.resolve(), Term::new(Operator::Add, Dice::new(100, 1000)));
	/// ```
	#[must_use]
	pub fn resolve(&self) -> Term {
		let dice = match self.shape {
			Shape::Dice {
				count,
				sides,
				explode,
				threshold,
				keep,
			} => {
				let count = clamp_count(count.unwrap_or(0));
				let mut dice = match sides {
					SidesToken::Fudge => Dice::fudge(count),
					SidesToken::Percent => Dice::new(count, 100),
					SidesToken::Num(sides) => Dice::new(count, sides.clamp(1, MAX_SIDES)),
				};
				dice.explode = explode;

				let limit = i32::try_from(count).unwrap_or(i32::MAX);
				dice.keep = keep.map_or(0, |keep| keep.clamp(-limit, limit));
				// A minimum of zero counts as no threshold at all
				dice.threshold = threshold.and_then(|(symbol, val)| match symbol {
					'>' => Some(val.min(dice.sides - 1)).filter(|&min| min > 0).map(Condition::Gt),
					_ => Some(Condition::Lt(val.max(2))),
				});
				dice
			}

			Shape::Literal { val, fudge: true } => Dice::fudge(clamp_count(val)),
			Shape::Literal { val, fudge: false } => Dice::literal(val),
		};

		Term {
			op: self.op.unwrap_or_default(),
			dice,
			label: self.label.clone(),
		}
	}
}

/// A segment of command text that becomes one block
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Segment {
	/// Whether the segment started with a `mini `/`m ` marker
	pub mini: bool,

	/// Text of the segment, without the marker or the separator
	pub text: String,

	/// Byte range of [`Self::text`] within the command text
	pub span: Range<usize>,
}

/// Result of scanning text for terms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Scan {
	/// Every term match found, in order, with its byte range
	pub matches: Vec<(TermMatch, Range<usize>)>,

	/// Byte ranges of text where no term started
	pub skipped: Vec<Range<usize>>,
}

/// Generates a parser for a single character in either case.
fn ci<'src>(c: char) -> impl Parser<'src, &'src str, char, Extra<'src>> + Clone {
	just(c.to_ascii_lowercase()).or(just(c.to_ascii_uppercase()))
}

/// Generates a parser for a run of `min` to `max` ASCII digits.
fn digits<'src>(min: usize, max: usize) -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
	any()
		.filter(char::is_ascii_digit)
		.repeated()
		.at_least(min)
		.at_most(max)
		.collect::<String>()
}

/// Generates a parser for a run of `min` to `max` ASCII digits as a number.
fn number<'src>(min: usize, max: usize) -> impl Parser<'src, &'src str, u32, Extra<'src>> + Clone {
	// At most five digits are ever read, so this can't overflow
	digits(min, max).map(|digits| digits.parse::<u32>().unwrap_or(0))
}

/// Generates a parser for any amount of whitespace.
fn whitespace<'src>() -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
	any().filter(char::is_ascii_whitespace).repeated()
}

/// Generates a parser for the operator that may precede a term.
pub fn operator<'src>() -> impl Parser<'src, &'src str, Operator, Extra<'src>> + Clone {
	choice((
		one_of("×*").to(Operator::Mul),
		just('/').to(Operator::Div),
		just('^').to(Operator::Max),
		ci('v').to(Operator::Min),
		just('+').to(Operator::Add),
		just('-').to(Operator::Sub),
	))
}

/// Generates a parser for the dice shape of a term, like "d20", "2d%", "4df", "10d6!>4k-3", etc.
pub fn dice_shape<'src>() -> impl Parser<'src, &'src str, Shape, Extra<'src>> + Clone {
	let sides = choice((
		ci('f').to(SidesToken::Fudge),
		just('%').to(SidesToken::Percent),
		number(1, 4).map(SidesToken::Num),
	));

	// Threshold to count rolls against (e.g. >4, <2)
	let threshold = one_of("<>").then(number(1, 4));

	// Keep highest/lowest (e.g. k3, k-3)
	let keep = ci('k')
		.ignore_then(just('-').or_not())
		.then(number(1, 3))
		.map(|(minus, count)| {
			let count = i32::try_from(count).unwrap_or(0);
			if minus.is_some() {
				-count
			} else {
				count
			}
		});

	digits(0, 3)
		.then_ignore(ci('d'))
		.then(sides)
		.then(just('!').or_not().map(|bang| bang.is_some()))
		.then(threshold.or_not())
		.then(keep.or_not())
		.map(|((((count, sides), explode), threshold), keep)| Shape::Dice {
			count: count.parse().ok(),
			sides,
			explode,
			threshold,
			keep,
		})
}

/// Generates a parser for the literal shape of a term, like "5" or "4f".
pub fn literal_shape<'src>() -> impl Parser<'src, &'src str, Shape, Extra<'src>> + Clone {
	number(1, 5)
		.then(ci('f').or_not().map(|f| f.is_some()))
		.map(|(val, fudge)| Shape::Literal { val, fudge })
}

/// Generates a parser for a full term: an optional operator, a dice or literal shape, and an optional label.
pub fn term_match<'src>() -> impl Parser<'src, &'src str, TermMatch, Extra<'src>> + Clone {
	// Label running to the end of the block (e.g. " for fire")
	let label = just(' ')
		.ignore_then(ci('f'))
		.ignore_then(ci('o'))
		.ignore_then(ci('r'))
		.ignore_then(just(' '))
		.ignore_then(none_of(",;").repeated().at_least(1).collect::<String>());

	operator()
		.or_not()
		.then_ignore(whitespace())
		.then(choice((dice_shape(), literal_shape())))
		.then(label.or_not())
		.map(|((op, shape), label)| TermMatch {
			op,
			shape,
			label: label
				.map(|label| label.trim_end().to_owned())
				.filter(|label| !label.is_empty()),
		})
}

/// Generates a parser that finds every term in a piece of text, skipping a character at a time wherever no term
/// starts.
fn term_scanner<'src>() -> impl Parser<'src, &'src str, Vec<Scanned>, Extra<'src>> + Clone {
	choice((
		term_match().map_with(|term, e| {
			let span: SimpleSpan = e.span();
			Scanned::Ok((term, span.start..span.end))
		}),
		any().map_with(|_, e| {
			let span: SimpleSpan = e.span();
			Scanned::Err(span.start..span.end)
		}),
	))
	.repeated()
	.collect::<Vec<_>>()
}

/// Generates a parser that splits command text into segments.
fn segment_scanner<'src>() -> impl Parser<'src, &'src str, Vec<Option<Segment>>, Extra<'src>> + Clone {
	let marker = choice((
		ci('m')
			.then(ci('i'))
			.then(ci('n'))
			.then(ci('i'))
			.then(just(' '))
			.ignored(),
		ci('m').then(just(' ')).ignored(),
	));

	let body = none_of(",;")
		.repeated()
		.at_least(1)
		.collect::<String>()
		.map_with(|text, e| {
			let span: SimpleSpan = e.span();
			(text, span.start..span.end)
		});

	// The marker only counts if there's something after it
	let segment = choice((
		marker.ignore_then(body.clone()).map(|(text, span)| Segment { mini: true, text, span }),
		body.map(|(text, span)| Segment {
			mini: false,
			text,
			span,
		}),
	));

	let separators = one_of(",;").or(any().filter(char::is_ascii_whitespace)).repeated();

	choice((segment.then_ignore(separators).map(Some), any().to(None)))
		.repeated()
		.collect::<Vec<_>>()
}

/// Splits command text into at most [`MAX_BLOCKS`] segments. Anything past the last segment is discarded.
///
/// # Examples
/// ```
/// use dicebot::parse::segments;
///
/// let segments = segments("2d6+3, mini 1d20>15 for attack;;m 4df");
/// assert_eq!(segments.len(), 3);
/// assert_eq!((segments[0].mini, segments[0].text.as_str()), (false, "2d6+3"));
/// assert_eq!((segments[1].mini, segments[1].text.as_str()), (true, "1d20>15 for attack"));
/// assert_eq!((segments[2].mini, segments[2].text.as_str()), (true, "4df"));
/// ```
#[must_use]
pub fn segments(text: &str) -> Vec<Segment> {
	all_segments(text).into_iter().take(MAX_BLOCKS).collect()
}

/// Splits command text into every segment, without the limit.
fn all_segments(text: &str) -> Vec<Segment> {
	segment_scanner()
		.parse(text)
		.into_output()
		.unwrap_or_default()
		.into_iter()
		.flatten()
		.collect()
}

/// Finds every term match in a block's text, along with the spans of text that were skipped.
#[must_use]
pub fn scan(text: &str) -> Scan {
	let mut scan = Scan::default();
	for item in term_scanner().parse(text).into_output().unwrap_or_default() {
		match item {
			Ok(found) => scan.matches.push(found),
			Err(span) => match scan.skipped.last_mut() {
				Some(last) if last.end == span.start => last.end = span.end,
				_ => scan.skipped.push(span),
			},
		}
	}
	scan
}

/// Parses a block's text into its terms, keeping at most [`MAX_TERMS`] matches and then applying the default-term
/// policy:
/// - if none of the matches is a genuine dice roll but there was at least one number, a `-1d100` term is appended;
/// - if there were no matches at all, a `+1d100` term is used.
///
/// # Examples
/// ```
/// use dicebot::{dice::Dice, parse::terms, term::{Operator, Term}};
///
/// assert_eq!(terms(""), vec![Term::new(Operator::Add, Dice::new(1, 100))]);
/// assert_eq!(
/// 	terms("Skill=50"),
/// 	vec![
/// 		Term::new(Operator::Add, Dice::literal(50)),
/// 		Term::new(Operator::Sub, Dice::new(1, 100)),
/// 	]
/// );
/// ```
#[must_use]
pub fn terms(text: &str) -> Vec<Term> {
	let matches = scan(text)
		.matches
		.into_iter()
		.take(MAX_TERMS)
		.map(|(found, _)| found)
		.collect::<Vec<_>>();

	let mut terms = matches.iter().map(TermMatch::resolve).collect::<Vec<_>>();
	if !matches.iter().any(TermMatch::is_roll) {
		let op = if terms.is_empty() { Operator::Add } else { Operator::Sub };
		terms.push(Term::new(op, Dice::default()));
	}
	terms
}

/// Parses a segment into a block.
#[must_use]
pub fn block(segment: &Segment) -> Block {
	Block {
		mini: segment.mini,
		terms: terms(&segment.text),
	}
}

/// Parses full command text into a command. Empty (or separator-only) text results in a single default block.
///
/// Parsing is pure: the same text always results in the same command.
///
/// # Examples
/// ```
/// use dicebot::parse::command;
///
/// let cmd = command("2d6+3, mini 1d20>15 for attack");
/// assert_eq!(cmd.blocks.len(), 2);
/// assert!(cmd.blocks[1].mini);
/// assert_eq!(cmd.blocks[1].terms[0].label.as_deref(), Some("attack"));
/// assert_eq!(cmd, command("2d6+3, mini 1d20>15 for attack"));
///
/// assert_eq!(command("").blocks.len(), 1);
/// ```
#[must_use]
pub fn command(text: &str) -> Command {
	let mut blocks = segments(text).iter().map(block).collect::<Vec<_>>();
	if blocks.is_empty() {
		blocks.push(Block {
			mini: false,
			terms: terms(""),
		});
	}

	let cmd = Command { blocks };
	log::debug!("parsed {text:?} as {cmd}");
	cmd
}

/// Finds the byte ranges of command text that don't contribute to the parsed command: text where no term starts
/// (other than whitespace), and any segments or terms past the limits.
///
/// # Examples
/// ```
/// use dicebot::parse::unmatched;
///
/// let text = "2d6 plus 3";
/// let ranges = unmatched(text);
/// assert_eq!(ranges.iter().map(|range| &text[range.clone()]).collect::<Vec<_>>(), vec!["plus"]);
/// ```
#[must_use]
pub fn unmatched(text: &str) -> Vec<Range<usize>> {
	let mut ranges = Vec::new();

	for (i, segment) in all_segments(text).into_iter().enumerate() {
		if i >= MAX_BLOCKS {
			let span = trim_range(text, segment.span);
			if !span.is_empty() {
				ranges.push(span);
			}
			continue;
		}

		let scan = scan(&segment.text);
		let skipped = scan
			.skipped
			.into_iter()
			.filter(|span| !segment.text[span.clone()].trim().is_empty())
			.map(|span| trim_range(&segment.text, span));
		let excess = scan
			.matches
			.into_iter()
			.skip(MAX_TERMS)
			.map(|(_, span)| trim_range(&segment.text, span));

		// Segment-relative to command-relative
		let offset = segment.span.start;
		ranges.extend(
			skipped
				.chain(excess)
				.map(|span| span.start + offset..span.end + offset),
		);
	}

	ranges.sort_by_key(|range| range.start);
	ranges
}

/// Narrows a range of text so that it doesn't start or end with whitespace.
fn trim_range(text: &str, range: Range<usize>) -> Range<usize> {
	let slice = &text[range.clone()];
	let start = range.start + (slice.len() - slice.trim_start().len());
	let end = range.end - (slice.len() - slice.trim_end().len());
	start..end.max(start)
}

/// Clamps a dice count to `1..=MAX_COUNT`.
fn clamp_count(count: u32) -> u32 {
	count.clamp(1, MAX_COUNT)
}
