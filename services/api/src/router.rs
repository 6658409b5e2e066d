use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use degreedash_core::health::healthz;
use degreedash_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    alumni::list_alumni,
    auth::{logout, microsoft_callback, microsoft_login, status},
    course::{
        add_course_professor, course_filters, course_roster, course_stats, create_course,
        delete_course, get_course, get_course_by_code, list_course_professors, list_courses,
        remove_course_professor, update_course, update_course_professor_role,
    },
    enrollment::{drop_course, enroll, list_my_enrollments},
    health::readyz,
    professor::{
        create_professor, delete_professor, get_professor, get_professor_by_name,
        list_professor_courses, list_professor_reviews, list_professors, professor_stats,
        update_professor,
    },
    review::{create_review, list_course_reviews, list_my_reviews},
    user::{
        get_alumni_profile, get_me, list_users, put_alumni_profile, update_me, user_stats,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.frontend_url);
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/microsoft", get(microsoft_login))
        .route("/auth/microsoft/callback", get(microsoft_callback))
        .route("/auth/status", get(status))
        .route("/auth/logout", post(logout))
        // Courses
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/filters", get(course_filters))
        .route("/courses/stats", get(course_stats))
        .route("/courses/code/{code}", get(get_course_by_code))
        .route(
            "/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route(
            "/courses/{id}/professors",
            get(list_course_professors).post(add_course_professor),
        )
        .route(
            "/courses/{id}/professors/{professor_id}",
            patch(update_course_professor_role).delete(remove_course_professor),
        )
        .route(
            "/courses/{id}/reviews",
            get(list_course_reviews).post(create_review),
        )
        .route("/courses/{id}/roster", get(course_roster))
        // Professors
        .route("/professors", get(list_professors).post(create_professor))
        .route("/professors/stats", get(professor_stats))
        .route("/professors/by-name/{name}", get(get_professor_by_name))
        .route(
            "/professors/{id}",
            get(get_professor)
                .put(update_professor)
                .delete(delete_professor),
        )
        .route("/professors/{id}/courses", get(list_professor_courses))
        .route("/professors/{id}/reviews", get(list_professor_reviews))
        // Users
        .route("/users", get(list_users))
        .route("/users/stats", get(user_stats))
        .route("/users/@me", get(get_me).patch(update_me))
        .route(
            "/users/@me/alumni-profile",
            get(get_alumni_profile).put(put_alumni_profile),
        )
        .route(
            "/users/@me/enrollments",
            get(list_my_enrollments).post(enroll),
        )
        .route("/users/@me/enrollments/{course_id}", delete(drop_course))
        .route("/users/@me/reviews", get(list_my_reviews))
        // Alumni
        .route("/alumni", get(list_alumni))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(cors),
        )
        .with_state(state)
}

/// Credentialed CORS for the single frontend origin.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(frontend_url, "invalid FRONTEND_URL, cross-origin requests disabled");
            layer
        }
    }
}
