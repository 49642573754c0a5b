use super::*;
use crate::campus::Role;
use crate::routes::auth::test_helpers::auth_user;
use crate::routes::test_helpers::body_json;
use crate::state::test_helpers::test_app_state;

async fn seeded_request_id(state: &AppState) -> Uuid {
    state.campus.read().await.event_requests[0].request_id
}

fn proposal(title: &str) -> Result<Json<NewEventRequest>, JsonRejection> {
    Ok(Json(NewEventRequest {
        title: title.to_owned(),
        event_type: "Seminar".into(),
        proposed_date: "2026-11-02".into(),
        proposed_time: "03:00 PM".into(),
        location: "Seminar Hall B".into(),
        ..NewEventRequest::default()
    }))
}

#[tokio::test]
async fn list_events_returns_seeded_calendar() {
    let body = body_json(list_events(State(test_app_state())).await).await;
    assert_eq!(body[0]["title"], "Data Structures Lecture");
    assert_eq!(body[1]["type"], "event");
}

#[tokio::test]
async fn submit_takes_name_and_department_from_session() {
    let state = test_app_state();
    let response = submit_request(State(state), auth_user(Role::Student), proposal("Robotics Demo")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["request"]["requesterName"], "Test Student");
    assert_eq!(body["request"]["department"], "Computer Science");
    assert_eq!(body["request"]["status"], "pending");
}

#[tokio::test]
async fn submit_without_title_is_bad_request() {
    let response = submit_request(State(test_app_state()), auth_user(Role::Student), proposal("  ")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "title is required");
}

#[tokio::test]
async fn approve_publishes_event() {
    let state = test_app_state();
    let id = seeded_request_id(&state).await;
    let response = approve_request(State(state.clone()), auth_user(Role::Faculty), Path(id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["notice"], "Request \"AI Workshop\" approved & published!");
    assert_eq!(body["event"]["status"], "upcoming");
    assert_eq!(body["event"]["time"], "02:00 PM - 04:00 PM");

    let campus = state.campus.read().await;
    assert_eq!(campus.events.len(), 3);
    assert_eq!(campus.events[2].kind, "Workshop");
}

#[tokio::test]
async fn reject_does_not_publish() {
    let state = test_app_state();
    let id = seeded_request_id(&state).await;
    let response = reject_request(State(state.clone()), auth_user(Role::Admin), Path(id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.campus.read().await.events.len(), 2);

    let listed = list_requests(
        State(state),
        auth_user(Role::Admin),
        Query(StatusQuery { status: Some("rejected".into()) }),
    )
    .await;
    assert_eq!(body_json(listed).await[0]["requestId"], id.to_string());
}

#[tokio::test]
async fn student_cannot_reject() {
    let state = test_app_state();
    let id = seeded_request_id(&state).await;
    let response = reject_request(State(state), auth_user(Role::Student), Path(id)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
