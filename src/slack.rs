//! Slack slash-command response payloads built from [`BlockReport`]s. Requires the `slack` feature.

use serde::Serialize;

use crate::report::{BlockReport, Field};

/// The user a roll is being made for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Slack identifies users by exactly these two values")]
pub struct Identity {
	/// Slack user ID, used for mentions
	pub user_id: String,

	/// Slack user name, used in plain-text fallbacks
	pub user_name: String,
}

impl Identity {
	/// Creates a new identity.
	#[must_use]
	pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			user_name: user_name.into(),
		}
	}
}

/// Response payload for a slash command, posted publicly in the channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Response {
	/// Visibility of the response (always `in_channel`)
	pub response_type: &'static str,

	/// One attachment per block
	pub attachments: Vec<Attachment>,
}

impl Response {
	/// Builds the response for a set of block reports.
	///
	/// # Examples
	/// ```
	/// use dicebot::{dice::roller::Val as ValRoller, parser, slack::{Identity, Response}};
	///
	/// let reports = parser("mini 2d6+3").report(&mut ValRoller(2))?;
	/// let response = Response::new(&Identity::new("U123", "alice"), &reports);
	/// assert_eq!(response.response_type, "in_channel");
	/// assert_eq!(response.attachments[0].pretext, "<@U123> rolled *4* + *3* = *7*");
	/// assert_eq!(response.attachments[0].fallback, "@alice rolled 4 + 3 = 7");
	/// assert!(response.attachments[0].fields.is_empty());
	/// # Ok::<(), dicebot::dice::Error>(())
	/// ```
	#[must_use]
	pub fn new(identity: &Identity, reports: &[BlockReport]) -> Self {
		Self {
			response_type: "in_channel",
			attachments: reports
				.iter()
				.map(|report| Attachment::new(identity, report))
				.collect(),
		}
	}
}

/// A message attachment presenting the result of a single block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Attachment {
	/// Plain-text version of the result
	pub fallback: String,

	/// Markdown text shown above the fields
	pub pretext: String,

	/// Color of the attachment's side bar (empty when nothing was rolled)
	pub color: &'static str,

	/// Diagnostic fields, empty for mini blocks
	pub fields: Vec<Field>,

	/// Attachment properties that contain markdown
	pub mrkdwn_in: Vec<&'static str>,
}

impl Attachment {
	/// Builds the attachment for a single block report.
	#[must_use]
	pub fn new(identity: &Identity, report: &BlockReport) -> Self {
		Self {
			fallback: format!("@{} rolled {}", identity.user_name, report.fallback),
			pretext: format!("<@{}> rolled {}", identity.user_id, report.summary),
			color: report.quality.map_or("", |quality| quality.color()),
			fields: report.diagnostics.iter().flat_map(|diag| diag.fields()).collect(),
			mrkdwn_in: vec!["pretext"],
		}
	}
}
