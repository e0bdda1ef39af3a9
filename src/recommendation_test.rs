use super::*;

const URL: &str = "https://referral.example.test";

#[test]
fn low_unset_offers_tips() {
    let view = ResultView::render(AnxietyBand::Low, Decision::Unset, URL);
    assert_eq!(view.headline, LOW_HEADLINE);
    assert_eq!(view.subtitle, Some(LOW_SUBTITLE));
    assert_eq!(view.body, ResultBody::Prompt { question: LOW_PROMPT });
    assert!(view.awaits_decision());
}

#[test]
fn low_yes_shows_four_tips() {
    let view = ResultView::render(AnxietyBand::Low, Decision::Yes, URL);
    match view.body {
        ResultBody::Tips { intro, tips } => {
            assert!(intro.is_none());
            assert_eq!(tips.len(), 4);
            assert_eq!(tips[0], "Maintain a consistent sleep schedule (7-9 hours).");
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn low_no_thanks_user() {
    let view = ResultView::render(AnxietyBand::Low, Decision::No, URL);
    assert_eq!(view.body, ResultBody::Message("Thank you for using VitalSense Diagnostics!"));
    assert!(!view.awaits_decision());
}

#[test]
fn high_unset_offers_further_analysis() {
    let view = ResultView::render(AnxietyBand::High, Decision::Unset, URL);
    assert_eq!(view.headline, "Anxiety stress detected");
    assert!(view.subtitle.is_none());
    assert_eq!(view.body, ResultBody::Prompt { question: HIGH_PROMPT });
}

#[test]
fn high_yes_goes_to_referral() {
    let view = ResultView::render(AnxietyBand::High, Decision::Yes, URL);
    assert_eq!(view.body, ResultBody::Referral { url: URL.to_owned() });
}

#[test]
fn high_no_shows_five_tips_with_intro() {
    let view = ResultView::render(AnxietyBand::High, Decision::No, URL);
    match view.body {
        ResultBody::Tips { intro, tips } => {
            assert_eq!(intro, Some(HIGH_TIPS_INTRO));
            assert_eq!(tips.len(), 5);
            assert_eq!(tips[0], "Practice mindful deep breathing exercises daily.");
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn referral_url_ignored_on_low_branch() {
    let a = ResultView::render(AnxietyBand::Low, Decision::Yes, "https://a.test");
    let b = ResultView::render(AnxietyBand::Low, Decision::Yes, "https://b.test");
    assert_eq!(a, b);
}
