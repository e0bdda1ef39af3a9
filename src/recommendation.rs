//! Result view: what to show for a band and the user's decision.
//!
//! Purely presentational. Low anxiety offers optional tips; high anxiety
//! offers a referral for further analysis and falls back to tips when the
//! user declines.

use crate::assessment::Decision;
use crate::prediction::AnxietyBand;

pub const LOW_HEADLINE: &str = "Low anxiety detected, no need for further analysis.";
pub const LOW_SUBTITLE: &str = "Keep up the good work!";
pub const LOW_PROMPT: &str = "Do you want to see some tips anyway?";
pub const LOW_THANKS: &str = "Thank you for using VitalSense Diagnostics!";

pub const HIGH_HEADLINE: &str = "Anxiety stress detected";
pub const HIGH_PROMPT: &str = "Do you want to go for further analysis?";
pub const HIGH_TIPS_INTRO: &str = "Thank you for your time. Here are some pointers for reducing anxiety:";

pub const LOW_ANXIETY_TIPS: [&str; 4] = [
    "Maintain a consistent sleep schedule (7-9 hours).",
    "Engage in regular physical activity or walking.",
    "Try journaling your thoughts before sleep.",
    "Stay hydrated and eat balanced meals.",
];

pub const HIGH_ANXIETY_TIPS: [&str; 5] = [
    "Practice mindful deep breathing exercises daily.",
    "Maintain a consistent sleep schedule (7-9 hours).",
    "Reduce caffeine and alcohol intake.",
    "Engage in regular physical activity or walking.",
    "Try journaling your thoughts before sleep.",
];

/// The body of the result view below its headline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultBody {
    /// Yes/no buttons under a question.
    Prompt { question: &'static str },
    /// Optional intro line and a bullet list.
    Tips { intro: Option<&'static str>, tips: &'static [&'static str] },
    /// A single closing line.
    Message(&'static str),
    /// The user left for the referral page.
    Referral { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub band: AnxietyBand,
    pub headline: &'static str,
    pub subtitle: Option<&'static str>,
    pub body: ResultBody,
}

impl ResultView {
    /// Choose the view for `band` and `decision`. `referral_url` is only
    /// used on the high-anxiety yes branch.
    #[must_use]
    pub fn render(band: AnxietyBand, decision: Decision, referral_url: &str) -> Self {
        match band {
            AnxietyBand::Low => {
                let body = match decision {
                    Decision::Unset => ResultBody::Prompt { question: LOW_PROMPT },
                    Decision::Yes => ResultBody::Tips { intro: None, tips: &LOW_ANXIETY_TIPS },
                    Decision::No => ResultBody::Message(LOW_THANKS),
                };
                Self { band, headline: LOW_HEADLINE, subtitle: Some(LOW_SUBTITLE), body }
            }
            AnxietyBand::High => {
                let body = match decision {
                    Decision::Unset => ResultBody::Prompt { question: HIGH_PROMPT },
                    Decision::Yes => ResultBody::Referral { url: referral_url.to_owned() },
                    Decision::No => ResultBody::Tips { intro: Some(HIGH_TIPS_INTRO), tips: &HIGH_ANXIETY_TIPS },
                };
                Self { band, headline: HIGH_HEADLINE, subtitle: None, body }
            }
        }
    }

    #[must_use]
    pub fn awaits_decision(&self) -> bool {
        matches!(self.body, ResultBody::Prompt { .. })
    }
}

#[cfg(test)]
#[path = "recommendation_test.rs"]
mod tests;
