//! Room personality adaptation.
//!
//! Rolling statistics over the room's recent interaction window nudge the
//! four personality axes by a small fixed step. Every nudge clamps to
//! [0, 1], so the vector can drift but never leave its range.

use crate::room::Interaction;
use crate::types::Personality;

/// Size of one adaptation nudge.
pub const ADAPT_STEP: f32 = 0.05;

/// Question/request proportion above which the room reads as inquisitive.
const INQUIRY_RATIO: f32 = 0.4;

/// Casual-intent proportion above which the room reads as informal.
const CASUAL_RATIO: f32 = 0.3;

/// Adapt a personality vector to the room's recent interaction window.
///
/// - helpfulness and verbosity rise in inquisitive rooms;
/// - humor rises while average sentiment stays positive;
/// - formality falls in casual or positive-toned rooms.
pub fn adapt(personality: &mut Personality, window: &[Interaction]) {
    if window.is_empty() {
        return;
    }
    #[allow(clippy::cast_precision_loss)]
    let len = window.len() as f32;

    let inquiries = window.iter().filter(|i| i.intent.is_inquiry()).count();
    let casual = window.iter().filter(|i| i.intent.is_casual()).count();
    let sentiment_sum: i32 = window.iter().map(|i| i.sentiment.weight()).sum();

    #[allow(clippy::cast_precision_loss)]
    let inquiry_ratio = inquiries as f32 / len;
    #[allow(clippy::cast_precision_loss)]
    let casual_ratio = casual as f32 / len;
    #[allow(clippy::cast_precision_loss)]
    let avg_sentiment = sentiment_sum as f32 / len;

    if inquiry_ratio > INQUIRY_RATIO {
        Personality::nudge(&mut personality.helpfulness, ADAPT_STEP);
        Personality::nudge(&mut personality.verbosity, ADAPT_STEP);
    }
    if avg_sentiment > 0.0 {
        Personality::nudge(&mut personality.humor, ADAPT_STEP);
    }
    if casual_ratio > CASUAL_RATIO || avg_sentiment > 0.5 {
        Personality::nudge(&mut personality.formality, -ADAPT_STEP);
    }
}
