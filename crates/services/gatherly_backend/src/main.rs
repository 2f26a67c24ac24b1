use axum::{middleware, routing::get, Router};
use gatherly_auth::middleware::{require_auth, AuthState};
use gatherly_common::{logging, NotificationDispatcher};
use gatherly_config::{ensure_dotenv_loaded, load_config};
use gatherly_db::{
    DbClient, SqlAvailabilityRepository, SqlEventRepository, SqlGroupRepository, SqlPushRepository,
    SqlUserRepository,
};
use gatherly_notifications::{FcmClient, NotificationService, ReminderJob};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    ensure_dotenv_loaded();
    logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));

    let db_client = DbClient::new(&config)
        .await
        .expect("Failed to connect to the database");

    let user_repo = SqlUserRepository::new(db_client.clone());
    let group_repo = SqlGroupRepository::new(db_client.clone());
    let availability_repo = SqlAvailabilityRepository::new(db_client.clone());
    let event_repo = SqlEventRepository::new(db_client.clone());
    let push_repo = SqlPushRepository::new(db_client.clone());

    init_schemas(
        &user_repo,
        &group_repo,
        &availability_repo,
        &event_repo,
        &push_repo,
    )
    .await;

    // The FCM dispatcher only exists when push is enabled and configured;
    // without it, notification calls throughout the API are no-ops.
    let notification_service = if config.use_push {
        match config.firebase.clone() {
            Some(firebase) if firebase.project_id.is_some() => {
                let sender = Arc::new(FcmClient::new(firebase));
                Some(Arc::new(NotificationService::new(
                    push_repo.clone(),
                    group_repo.clone(),
                    sender,
                )))
            }
            _ => {
                warn!("use_push is set but firebase.project_id is missing, push disabled");
                None
            }
        }
    } else {
        info!("Push notifications disabled by configuration");
        None
    };

    let dispatcher: Option<Arc<dyn NotificationDispatcher>> = notification_service
        .clone()
        .map(|service| service as Arc<dyn NotificationDispatcher>);

    let mut api_router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(gatherly_auth::routes(user_repo.clone()))
        .merge(gatherly_groups::routes(
            group_repo.clone(),
            event_repo.clone(),
            dispatcher.clone(),
            config.invite.clone(),
        ))
        .merge(gatherly_availability::routes(
            group_repo.clone(),
            availability_repo.clone(),
        ))
        .merge(gatherly_events::routes(
            group_repo.clone(),
            event_repo.clone(),
            dispatcher.clone(),
        ));

    if let Some(service) = notification_service.clone() {
        api_router = api_router.merge(gatherly_notifications::routes(service));
    }

    let auth_state = Arc::new(AuthState::new(config.clone(), user_repo.clone()));
    let api_router = api_router.layer(middleware::from_fn_with_state(
        auth_state,
        require_auth::<SqlUserRepository>,
    ));

    #[allow(unused_mut)]
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(CorsLayer::permissive());

    #[cfg(feature = "openapi")]
    {
        use gatherly_auth::doc::AuthApiDoc;
        use gatherly_availability::doc::AvailabilityApiDoc;
        use gatherly_events::doc::EventsApiDoc;
        use gatherly_groups::doc::GroupsApiDoc;
        use gatherly_notifications::doc::NotificationsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Gatherly API",
                version = "0.1.0",
                description = "Group scheduling: availability, events, invites, and push"
            ),
            servers( (url = "/api", description = "Main API prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(AuthApiDoc::openapi());
        openapi_doc.merge(GroupsApiDoc::openapi());
        openapi_doc.merge(AvailabilityApiDoc::openapi());
        openapi_doc.merge(EventsApiDoc::openapi());
        openapi_doc.merge(NotificationsApiDoc::openapi());

        info!("Adding Swagger UI at /api/docs");
        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    if let Some(dispatcher) = dispatcher {
        let job = Arc::new(ReminderJob::new(event_repo.clone(), dispatcher));
        job.spawn();
        info!("Reminder sweep scheduled");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}

/// Create every table on startup; each statement is idempotent.
async fn init_schemas(
    user_repo: &SqlUserRepository,
    group_repo: &SqlGroupRepository,
    availability_repo: &SqlAvailabilityRepository,
    event_repo: &SqlEventRepository,
    push_repo: &SqlPushRepository,
) {
    use gatherly_db::{
        AvailabilityRepository, EventRepository, GroupRepository, PushRepository, UserRepository,
    };

    user_repo
        .init_schema()
        .await
        .expect("Failed to initialize users schema");
    group_repo
        .init_schema()
        .await
        .expect("Failed to initialize groups schema");
    availability_repo
        .init_schema()
        .await
        .expect("Failed to initialize availability schema");
    event_repo
        .init_schema()
        .await
        .expect("Failed to initialize events schema");
    push_repo
        .init_schema()
        .await
        .expect("Failed to initialize push schema");
}
