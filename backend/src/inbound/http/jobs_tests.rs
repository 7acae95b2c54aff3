//! Tests for job handlers.

use super::*;
use crate::domain::ports::{MissingTeamLead, MockJobCommand, MockListingQuery};
use crate::domain::JobDraft;
use crate::inbound::http::session::USER_ID_KEY;
use crate::inbound::http::test_utils::{
    in_memory_state, login_cookie, seed_user, session_cookie, test_session_middleware,
};
use crate::inbound::http::users::login;
use crate::test_support::{job_fields, user_id};
use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(test_session_middleware())
        .service(login)
        .service(list_jobs)
        .service(job_form)
        .service(create_job)
        .service(edit_job)
        .service(update_job)
        .service(delete_job)
}

fn job_body(title: &str, team_leader: i32) -> Value {
    json!({
        "job": title,
        "team_leader": team_leader,
        "work_size": 15,
        "collaborators": "2, 3",
        "start_date": "2024-05-01",
        "end_date": "2024-05-04",
    })
}

fn post_job(uri: &str, body: Value, cookie: Cookie<'static>) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri(uri)
        .cookie(cookie)
        .set_json(body)
        .to_request()
}

fn draft(title: &str, team_leader: i32) -> JobDraft {
    job_fields(title, team_leader)
        .validate()
        .expect("valid job")
}

#[actix_web::test]
async fn empty_listing_is_an_empty_array() {
    let (state, _) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn created_job_shows_in_the_listing() {
    let (state, store) = in_memory_state();
    seed_user(&store, "Ridley", "Scott").await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "Ridley").await;

    let res = actix_test::call_service(&app, post_job("/add_work", job_body("deploy", 1), cookie))
        .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/")
    );

    let listing = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/").to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(listing).await;
    assert_eq!(body[0]["title"], "deploy");
    assert_eq!(body[0]["leader"], "Scott Ridley");
    assert_eq!(body[0]["durationDays"], 3);
    assert_eq!(body[0]["owner"], 1);
    assert!(body[0].get("missingTeamLead").is_none());
}

#[actix_web::test]
async fn listing_marks_a_missing_team_lead() {
    let mut listing = MockListingQuery::new();
    listing.expect_build_listing().times(1).return_once(|| {
        let job = Job::new(JobId::new(4), user_id(2), draft("survey", 9));
        Ok(vec![ListedJob {
            id: job.id(),
            title: "survey".to_owned(),
            leader: Err(MissingTeamLead {
                team_lead: user_id(9),
            }),
            duration_days: job.duration_days(),
            work_size: 15,
            collaborators: "2, 3".to_owned(),
            is_finished: false,
            job,
        }])
    });
    let (state, _) = in_memory_state();
    let mut state = state.into_inner().as_ref().clone();
    state.listing = Arc::new(listing);
    let app = actix_test::init_service(test_app(web::Data::new(state))).await;

    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
        .await;
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body[0]["missingTeamLead"], 9);
    assert!(body[0].get("leader").is_none());
}

#[rstest]
#[case("/add_work")]
#[case("/work/1")]
#[case("/work_delete/1")]
#[actix_web::test]
async fn job_routes_require_a_session(#[case] uri: &str) {
    let (state, _) = in_memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn session_for_an_unregistered_user_cannot_create_jobs() {
    let (state, store) = in_memory_state();
    seed_user(&store, "Ridley", "Scott").await;
    let app = actix_test::init_service(test_app(state).route(
        "/stale",
        web::get().to(|session: actix_session::Session| async move {
            session.insert(USER_ID_KEY, 42).expect("set stale user id");
            HttpResponse::Ok()
        }),
    ))
    .await;
    let stale = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/stale").to_request(),
    )
    .await;
    let cookie = session_cookie(&stale).expect("session cookie set");

    let res = actix_test::call_service(&app, post_job("/add_work", job_body("deploy", 1), cookie))
        .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let listing =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
    let body: Value = actix_test::read_body_json(listing).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn unknown_team_lead_is_rejected() {
    let (state, store) = in_memory_state();
    seed_user(&store, "Ridley", "Scott").await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "Ridley").await;

    let res = actix_test::call_service(&app, post_job("/add_work", job_body("deploy", 42), cookie))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "team_leader");
}

#[actix_web::test]
async fn stranger_cannot_edit_but_owner_can() {
    let (state, store) = in_memory_state();
    seed_user(&store, "Ridley", "Scott").await;
    seed_user(&store, "Andy", "Weir").await;
    seed_user(&store, "Mark", "Watney").await;
    let app = actix_test::init_service(test_app(state)).await;
    let andy = login_cookie(&app, "Andy").await;
    let mark = login_cookie(&app, "Mark").await;

    let created =
        actix_test::call_service(&app, post_job("/add_work", job_body("deploy", 1), andy.clone()))
            .await;
    assert_eq!(created.status(), StatusCode::SEE_OTHER);

    let denied = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/work/1").cookie(mark.clone()).to_request(),
    )
    .await;
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let rejected =
        actix_test::call_service(&app, post_job("/work/1", job_body("hijack", 1), mark)).await;
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);

    let updated =
        actix_test::call_service(&app, post_job("/work/1", job_body("redeploy", 1), andy.clone()))
            .await;
    assert_eq!(updated.status(), StatusCode::SEE_OTHER);

    let edit = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/work/1").cookie(andy).to_request(),
    )
    .await;
    assert_eq!(edit.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(edit).await;
    assert_eq!(body["title"], "redeploy");
    assert_eq!(body["owner"], 2);
    assert_eq!(body["startDate"], "2024-05-01");
}

#[actix_web::test]
async fn administrator_may_edit_any_job() {
    let (state, store) = in_memory_state();
    seed_user(&store, "Ridley", "Scott").await;
    seed_user(&store, "Andy", "Weir").await;
    let app = actix_test::init_service(test_app(state)).await;
    let andy = login_cookie(&app, "Andy").await;
    let admin = login_cookie(&app, "Ridley").await;

    actix_test::call_service(&app, post_job("/add_work", job_body("deploy", 2), andy)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/work/1").cookie(admin).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[rstest]
#[case(actix_test::TestRequest::get())]
#[case(actix_test::TestRequest::post())]
#[actix_web::test]
async fn owner_deletes_with_either_method(#[case] request: actix_test::TestRequest) {
    let (state, store) = in_memory_state();
    seed_user(&store, "Ridley", "Scott").await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "Ridley").await;
    actix_test::call_service(&app, post_job("/add_work", job_body("deploy", 1), cookie.clone()))
        .await;

    let res = actix_test::call_service(
        &app,
        request.uri("/work_delete/1").cookie(cookie.clone()).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let gone = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/work/1").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_by_non_owner_is_not_found() {
    let mut jobs = MockJobCommand::new();
    jobs.expect_delete()
        .withf(|identity, id| *identity == user_id(3) && *id == JobId::new(1))
        .times(1)
        .return_once(|_, _| Err(Error::not_found("job 1 not found")));
    let (state, store) = in_memory_state();
    for (name, surname) in [("Ridley", "Scott"), ("Andy", "Weir"), ("Mark", "Watney")] {
        seed_user(&store, name, surname).await;
    }
    let mut state = state.into_inner().as_ref().clone();
    state.jobs = Arc::new(jobs);
    let app = actix_test::init_service(test_app(web::Data::new(state))).await;
    let mark = login_cookie(&app, "Mark").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/work_delete/1").cookie(mark).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn form_descriptor_needs_a_session() {
    let (state, store) = in_memory_state();
    seed_user(&store, "Ridley", "Scott").await;
    let app = actix_test::init_service(test_app(state)).await;
    let cookie = login_cookie(&app, "Ridley").await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/add_work").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["form"], "add_work");
    assert_eq!(body["optional"], json!(["is_finished"]));
}

#[rstest]
fn listed_view_keeps_exactly_one_leader_field() {
    let job = Job::new(JobId::new(1), user_id(1), draft("deploy", 1));
    let row = ListedJob {
        id: job.id(),
        title: "deploy".to_owned(),
        leader: Ok("Scott Ridley".to_owned()),
        duration_days: 3,
        work_size: 15,
        collaborators: "2, 3".to_owned(),
        is_finished: true,
        job,
    };
    let view = ListedJobView::from(row);
    assert_eq!(view.leader.as_deref(), Some("Scott Ridley"));
    assert_eq!(view.missing_team_lead, None);
    assert!(view.is_finished);
}
