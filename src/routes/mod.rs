pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use std::path::Path;

use actix_files::Files;
use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::storage::UPLOADS_PATH;

/// Mounts every route. `/auth/register` and `/auth/login` are public;
/// everything else sits behind `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(
            web::scope("/auth")
                .service(auth::login)
                .service(auth::register)
                .service(
                    web::resource("/logout")
                        .wrap(AuthMiddleware)
                        .route(web::post().to(auth::logout)),
                ),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        )
        .service(
            web::scope("/users")
                .wrap(AuthMiddleware)
                .service(users::get_me)
                .service(users::delete_me)
                .service(users::upload_profile_image),
        );
}

/// Serves the files written by `LocalImageStore` from `upload_dir`.
///
/// Public, like the URLs stored on user profiles. No directory listings.
/// The directory must exist when this is called.
pub fn uploads(upload_dir: &Path) -> Files {
    Files::new(UPLOADS_PATH, upload_dir)
}
