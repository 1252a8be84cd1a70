mod common;

use common::*;
use teamattr_core::{
    ActingUser, AttributeError, AttributeInput, AttributeOption, AttributeService, AttributeType,
    CreateAttribute, ValidationError,
};
use teamattr_views::{AttributeDetailView, DetailState, Navigation, NoticeKind};

async fn loaded_mock_view(service: MockService) -> AttributeDetailView {
    let mut view = AttributeDetailView::new(mock_cache(service), 7, 1);
    view.load().await;
    view
}

fn serving_team() -> MockService {
    let mut service = MockService::new();
    service
        .expect_get_team()
        .returning(|_, _| Ok(admin_team_view()));
    service
}

#[tokio::test]
async fn test_loads_clean() {
    let view = loaded_mock_view(serving_team()).await;

    let form = view.form().unwrap();
    assert_eq!(form.name, "Skills");
    assert_eq!(form.attribute_type, AttributeType::SingleSelect);
    assert!(form.options_visible());
    assert!(!view.is_dirty());
    assert!(!view.can_save());
}

#[tokio::test]
async fn test_type_toggle_keeps_option_buffer() {
    let mut view = loaded_mock_view(serving_team()).await;

    view.set_type(AttributeType::Text);
    assert!(view.is_dirty());
    assert!(!view.form().unwrap().options_visible());
    assert_eq!(view.form().unwrap().options.len(), 1);

    view.set_type(AttributeType::SingleSelect);
    assert!(!view.is_dirty());
    assert_eq!(
        view.form().unwrap().options,
        vec![AttributeOption::new("a", "Go")]
    );
}

#[tokio::test]
async fn test_clean_form_does_not_save() {
    let mut service = serving_team();
    service.expect_update_attribute().never();

    let mut view = loaded_mock_view(service).await;
    assert!(view.begin_save().is_none());
    view.save().await;
    assert!(view.take_notices().is_empty());
}

#[tokio::test]
async fn test_save_disabled_while_in_flight() {
    let mut view = loaded_mock_view(serving_team()).await;
    view.set_name("Languages");

    let request = view.begin_save().unwrap();
    assert_eq!(request.team_id, 7);
    assert_eq!(request.attribute_id, 1);
    assert_eq!(request.input.name, "Languages");
    assert_eq!(request.input.attribute_type, "SINGLE_SELECT");
    assert_eq!(request.input.hidden, None);

    assert!(view.is_saving());
    assert!(!view.can_save());
    assert!(view.begin_save().is_none());
}

#[tokio::test]
async fn test_failed_save_stays_dirty() {
    let mut service = serving_team();
    service.expect_update_attribute().times(1).returning(|_, _| {
        Err(AttributeError::Validation(ValidationError::new(
            "options",
            "duplicate option id 'a'",
        )))
    });

    let mut view = loaded_mock_view(service).await;
    view.add_option(AttributeOption::new("a", "Rust"));
    view.save().await;

    assert!(view.is_dirty());
    assert!(!view.is_saving());
    assert!(view.can_save());

    let notices = view.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(view.take_navigation(), None);
}

#[tokio::test]
async fn test_not_found_on_save_navigates_back() {
    let mut service = serving_team();
    service
        .expect_update_attribute()
        .times(1)
        .returning(|_, request| Err(AttributeError::attribute_not_found(request.attribute_id)));

    let mut view = loaded_mock_view(service).await;
    view.set_allow_edit(true);
    view.save().await;

    assert_eq!(
        view.take_navigation(),
        Some(Navigation::AttributeList { team_id: 7 })
    );
    assert!(view.take_notices()[0].is_error());
}

#[tokio::test]
async fn test_missing_attribute_navigates_back() {
    let mut view = AttributeDetailView::new(mock_cache(serving_team()), 7, 999);
    view.load().await;

    assert_eq!(view.state(), &DetailState::NotFound);
    assert_eq!(
        view.take_navigation(),
        Some(Navigation::AttributeList { team_id: 7 })
    );
}

#[tokio::test]
async fn test_unexpected_load_error_stays_on_page() {
    let mut service = MockService::new();
    service
        .expect_get_team()
        .returning(|_, _| Err(AttributeError::Unauthorized));

    let view = loaded_mock_view(service).await;
    assert!(matches!(view.state(), DetailState::Error(_)));
}

#[tokio::test]
async fn test_save_rebases_on_server_values() {
    let fixture = Fixture::new().await;
    let admin = ActingUser::new(fixture.admin);
    let created = fixture
        .service()
        .create_attribute(
            &admin,
            CreateAttribute {
                team_id: 7,
                input: AttributeInput::new("Skills", "SINGLE_SELECT")
                    .with_options(vec![AttributeOption::new("a", "Go")])
                    .with_hidden(true),
            },
        )
        .await
        .unwrap();

    let cache = fixture.cache_for(fixture.admin);
    let mut view = AttributeDetailView::new(cache.clone(), 7, created.id);
    view.load().await;
    assert!(cache.is_cached(7).await);

    view.set_type(AttributeType::Text);
    view.set_name("Bio");
    view.save().await;

    assert!(!view.is_dirty());
    let form = view.form().unwrap();
    assert_eq!(form.name, "Bio");
    assert_eq!(form.attribute_type, AttributeType::Text);
    assert!(form.options.is_empty());
    assert!(!cache.is_cached(7).await);

    let stored = fixture.service().store().find(7, created.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Bio");
    assert!(stored.options().is_empty());
    assert!(stored.hidden);

    assert_eq!(view.take_notices()[0].kind, NoticeKind::Success);
}

#[tokio::test]
async fn test_option_edits_are_saved() {
    let fixture = Fixture::new().await;
    let admin = ActingUser::new(fixture.admin);
    let created = fixture
        .service()
        .create_attribute(
            &admin,
            CreateAttribute {
                team_id: 7,
                input: AttributeInput::new("Skills", "MULTI_SELECT").with_options(vec![
                    AttributeOption::new("go", "Go"),
                    AttributeOption::new("rs", "Rust"),
                ]),
            },
        )
        .await
        .unwrap();

    let mut view = AttributeDetailView::new(fixture.cache_for(fixture.admin), 7, created.id);
    view.load().await;
    view.remove_option("go");
    view.set_option_label("rs", "Rust lang");
    view.add_option(AttributeOption::new("zig", "Zig"));
    view.save().await;

    let stored = fixture.service().store().find(7, created.id).await.unwrap().unwrap();
    assert_eq!(
        stored.options(),
        &[
            AttributeOption::new("rs", "Rust lang"),
            AttributeOption::new("zig", "Zig"),
        ]
    );
}

#[tokio::test]
async fn test_member_save_is_rejected() {
    let fixture = Fixture::new().await;
    let created = fixture
        .service()
        .create_attribute(
            &ActingUser::new(fixture.admin),
            CreateAttribute {
                team_id: 7,
                input: AttributeInput::new("Skills", "TEXT"),
            },
        )
        .await
        .unwrap();

    let mut view = AttributeDetailView::new(fixture.cache_for(fixture.member), 7, created.id);
    view.load().await;
    view.set_name("Mine");
    view.save().await;

    assert!(view.is_dirty());
    let notices = view.take_notices();
    assert_eq!(
        notices[0].message,
        "You are not allowed to manage attributes of this team"
    );
}

#[tokio::test]
async fn test_round_trip_through_selection_type_stays_clean() {
    let fixture = Fixture::new().await;
    let created = fixture
        .service()
        .create_attribute(
            &ActingUser::new(fixture.admin),
            CreateAttribute {
                team_id: 7,
                input: AttributeInput::new("Bio", "TEXT"),
            },
        )
        .await
        .unwrap();

    let mut view = AttributeDetailView::new(fixture.cache_for(fixture.admin), 7, created.id);
    view.load().await;

    view.set_type(AttributeType::SingleSelect);
    view.add_option(AttributeOption::new("a", "Go"));
    assert!(view.is_dirty());

    view.set_type(AttributeType::Text);
    assert_eq!(view.form().unwrap().options.len(), 1);
    assert!(!view.is_dirty());
    assert!(!view.can_save());
}
