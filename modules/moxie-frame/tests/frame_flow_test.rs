use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Barrier;

use moxie_frame::testing::{earnings, profile, MockEarningsSource, MockProfileSource};
use moxie_frame::{
    ActionKind, CarriedState, FrameHandler, FrameLinks, ImageUrlRenderer, RequestContext, Screen,
};

const SPLASH: &str = "https://img.example/splash.png";

fn links() -> FrameLinks {
    FrameLinks {
        app_url: "https://moxie.example".to_string(),
        frames_url: "https://moxie.example/frames".to_string(),
        composer_url: "https://warpcast.com/~/compose".to_string(),
        share_text: "Check your Moxie rewards".to_string(),
    }
}

fn handler(profiles: &Arc<MockProfileSource>, moxie: &Arc<MockEarningsSource>) -> FrameHandler {
    FrameHandler::new(
        profiles.clone(),
        moxie.clone(),
        Arc::new(ImageUrlRenderer::new(
            SPLASH,
            "https://moxie.example/api/score-image",
        )),
        links(),
    )
}

fn alice() -> farscore_client::ProfileRecord {
    let mut alice = profile("Alice", "999");
    alice.is_power_user = true;
    alice
}

fn url_ctx(url: &str) -> RequestContext {
    RequestContext {
        url: Some(url.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn no_identifier_anywhere_shows_splash() {
    let profiles = Arc::new(MockProfileSource::new());
    let moxie = Arc::new(MockEarningsSource::new());

    let response = handler(&profiles, &moxie)
        .handle(&url_ctx("https://moxie.example/frames"))
        .await;

    assert_eq!(response.screen, Screen::Splash);
    assert_eq!(response.image, SPLASH);
    assert_eq!(response.buttons.len(), 1);
    assert_eq!(response.buttons[0].target, "https://moxie.example?userfid=");
    assert_eq!(profiles.calls(), 0);
    assert_eq!(moxie.calls(), 0);
    assert_eq!(response.state, CarriedState::default());
}

#[tokio::test]
async fn url_identifier_renders_score_with_share() {
    let profiles = Arc::new(MockProfileSource::new().on("999", alice()));
    let moxie = Arc::new(MockEarningsSource::new().on("999", earnings("10", "70", "700")));

    let response = handler(&profiles, &moxie)
        .handle(&url_ctx("https://moxie.example/frames?userfid=999"))
        .await;

    let Screen::Score(card) = &response.screen else {
        panic!("expected score screen, got {:?}", response.screen);
    };
    assert_eq!(card.username, "Alice");
    assert!(card.is_power_user);
    assert_eq!(
        (card.today.as_str(), card.weekly.as_str(), card.lifetime.as_str()),
        ("10", "70", "700")
    );

    assert_eq!(response.buttons.len(), 2);
    assert_eq!(response.buttons[0].kind, ActionKind::Navigate);
    assert_eq!(response.buttons[0].target, "https://moxie.example?userfid=999");
    assert_eq!(response.buttons[1].kind, ActionKind::ExternalLink);
    assert!(response.buttons[1]
        .target
        .ends_with("&embeds[]=https://moxie.example/frames?userfid=999"));

    assert_eq!(response.state.last_fid.as_deref(), Some("999"));
    assert_eq!(profiles.calls(), 1);
    assert_eq!(moxie.calls(), 1);
}

#[tokio::test]
async fn message_identifier_wins_over_url() {
    let profiles = Arc::new(MockProfileSource::new().on("42", profile("Msg", "42")));
    let moxie = Arc::new(MockEarningsSource::new().on("42", earnings("1", "1", "1")));

    let ctx = RequestContext {
        message_fid: Some(42),
        url: Some("https://moxie.example/frames?userfid=999".to_string()),
        prior: None,
    };
    let response = handler(&profiles, &moxie).handle(&ctx).await;

    let Screen::Score(card) = &response.screen else {
        panic!("expected score screen");
    };
    assert_eq!(card.fid, "42");
    assert_eq!(card.username, "Msg");
}

#[tokio::test]
async fn both_sources_run_concurrently_once_each() {
    // Each mock waits for the other; a sequential join would never release.
    let barrier = Arc::new(Barrier::new(2));
    let profiles = Arc::new(
        MockProfileSource::new()
            .on("999", alice())
            .with_barrier(barrier.clone()),
    );
    let moxie = Arc::new(
        MockEarningsSource::new()
            .on("999", earnings("10", "70", "700"))
            .with_barrier(barrier),
    );
    let handler = handler(&profiles, &moxie);

    let response = tokio::time::timeout(
        Duration::from_secs(5),
        handler.handle(&url_ctx("https://moxie.example/frames?userfid=999")),
    )
    .await
    .expect("fetches did not overlap");

    assert!(matches!(response.screen, Screen::Score(_)));
    assert_eq!(profiles.calls(), 1);
    assert_eq!(moxie.calls(), 1);
}

#[tokio::test]
async fn profile_failure_keeps_earnings_and_drops_share() {
    let profiles = Arc::new(MockProfileSource::new());
    let moxie = Arc::new(MockEarningsSource::new().on("5", earnings("1234567.5", "0", "3")));

    let response = handler(&profiles, &moxie)
        .handle(&url_ctx("https://moxie.example/frames?userfid=5"))
        .await;

    let Screen::Score(card) = &response.screen else {
        panic!("expected score screen");
    };
    assert_eq!(card.profile_image_url, "");
    assert_eq!(card.social_capital_score, "N/A");
    assert_eq!(card.social_capital_rank, "N/A");
    assert_eq!(card.today, "1,234,567.5");
    assert_eq!(response.buttons.len(), 1);
    assert!(response.state.profile.is_none());
    assert!(response.state.earnings.is_some());
}

#[tokio::test]
async fn total_failure_degrades_to_splash() {
    let profiles = Arc::new(MockProfileSource::new());
    let moxie = Arc::new(MockEarningsSource::new());

    let response = handler(&profiles, &moxie)
        .handle(&url_ctx("https://moxie.example/frames?userfid=5"))
        .await;

    assert_eq!(response.screen, Screen::Splash);
    assert_eq!(response.buttons.len(), 1);
    assert_eq!(response.buttons[0].target, "https://moxie.example?userfid=5");
    assert_eq!(profiles.calls(), 1);
    assert_eq!(moxie.calls(), 1);
}

#[tokio::test]
async fn carried_state_for_same_fid_skips_fetches() {
    let profiles = Arc::new(MockProfileSource::new().on("999", alice()));
    let moxie = Arc::new(MockEarningsSource::new().on("999", earnings("10", "70", "700")));
    let handler = handler(&profiles, &moxie);

    let first = handler
        .handle(&url_ctx("https://moxie.example/frames?userfid=999"))
        .await;

    let second_ctx = RequestContext {
        message_fid: Some(999),
        url: None,
        prior: Some(CarriedState::decode(&first.state.encode()).unwrap()),
    };
    let second = handler.handle(&second_ctx).await;

    assert_eq!(profiles.calls(), 1);
    assert_eq!(moxie.calls(), 1);
    assert_eq!(second.screen, first.screen);
    assert_eq!(second.buttons, first.buttons);
    assert_eq!(second.image, first.image);
    assert_eq!(second.state, first.state);
}

#[tokio::test]
async fn carried_state_for_other_fid_refetches() {
    let profiles = Arc::new(
        MockProfileSource::new()
            .on("999", alice())
            .on("7", profile("Bob", "7")),
    );
    let moxie = Arc::new(
        MockEarningsSource::new()
            .on("999", earnings("10", "70", "700"))
            .on("7", earnings("1", "2", "3")),
    );
    let handler = handler(&profiles, &moxie);

    let first = handler
        .handle(&url_ctx("https://moxie.example/frames?userfid=999"))
        .await;
    let second = handler
        .handle(&RequestContext {
            message_fid: Some(7),
            url: None,
            prior: Some(first.state),
        })
        .await;

    let Screen::Score(card) = &second.screen else {
        panic!("expected score screen");
    };
    assert_eq!(card.username, "Bob");
    assert_eq!(profiles.calls(), 2);
    assert_eq!(moxie.calls(), 2);
}

#[tokio::test]
async fn carried_last_fid_is_used_when_nothing_else_resolves() {
    let profiles = Arc::new(MockProfileSource::new().on("3", profile("Carol", "3")));
    let moxie = Arc::new(MockEarningsSource::new().on("3", earnings("0", "0", "0")));

    let response = handler(&profiles, &moxie)
        .handle(&RequestContext {
            message_fid: None,
            url: Some("not a url".to_string()),
            prior: Some(CarriedState {
                last_fid: Some("3".to_string()),
                ..Default::default()
            }),
        })
        .await;

    let Screen::Score(card) = &response.screen else {
        panic!("expected score screen");
    };
    assert_eq!(card.username, "Carol");
    assert_eq!(profiles.calls(), 1);
}

#[tokio::test]
async fn profile_with_foreign_fid_is_pinned_to_requested_fid() {
    let mut stray = profile("Alice", "999");
    stray.fid = "N/A".to_string();
    let profiles = Arc::new(MockProfileSource::new().on("999", stray));
    let moxie = Arc::new(MockEarningsSource::new().on("999", earnings("10", "70", "700")));
    let handler = handler(&profiles, &moxie);

    let mut prior = None;
    let mut screens = Vec::new();
    for _ in 0..3 {
        let response = handler
            .handle(&RequestContext {
                message_fid: Some(999),
                url: None,
                prior: prior.take(),
            })
            .await;
        screens.push(response.screen.clone());
        prior = Some(response.state);
    }

    let carried = prior.unwrap();
    assert_eq!(carried.profile.map(|p| p.fid).as_deref(), Some("999"));
    assert_eq!(profiles.calls(), 1);
    assert_eq!(moxie.calls(), 1);
    assert!(screens.iter().all(|screen| *screen == screens[0]));
}

#[tokio::test]
async fn earnings_failure_degrades_to_splash_and_retries() {
    let profiles = Arc::new(MockProfileSource::new().on("999", alice()));
    let moxie = Arc::new(MockEarningsSource::new());
    let handler = handler(&profiles, &moxie);

    let first = handler
        .handle(&url_ctx("https://moxie.example/frames?userfid=999"))
        .await;

    assert_eq!(first.screen, Screen::Splash);
    assert_eq!(first.buttons.len(), 1);
    assert!(first.state.profile.is_none());

    handler
        .handle(&RequestContext {
            message_fid: Some(999),
            url: None,
            prior: Some(first.state),
        })
        .await;

    assert_eq!(profiles.calls(), 2);
    assert_eq!(moxie.calls(), 2);
}
