use crate::{
    api::{attendance, grades, modules, reports},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::Condition, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build the per-peer limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / requests_per_min as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst size are non-zero");
        Governor::new(&cfg)
    }

    let limiter = Condition::new(
        config.rate_api_per_min > 0,
        build_limiter(config.rate_api_per_min),
    );

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(limiter) // rate limiting, off when RATE_API_PER_MIN=0
            .service(
                web::scope("/modules")
                    // /modules
                    .service(web::resource("").route(web::get().to(modules::list_modules)))
                    // /modules/{module}
                    .service(web::resource("/{module}").route(web::get().to(modules::open_module))),
            )
            .service(
                web::scope("/grades")
                    // /grades
                    .service(web::resource("").route(web::post().to(grades::record_grade)))
                    .service(web::resource("/courses").route(web::get().to(grades::list_courses)))
                    // /grades/courses/{course_id}/students
                    .service(
                        web::resource("/courses/{course_id}/students")
                            .route(web::get().to(grades::list_enrolled_students)),
                    )
                    .service(web::resource("/history").route(web::get().to(grades::grade_history)))
                    .service(
                        web::resource("/dashboard").route(web::get().to(grades::grades_dashboard)),
                    ),
            )
            .service(
                web::scope("/attendance").service(
                    web::resource("/history").route(web::get().to(attendance::attendance_history)),
                ),
            )
            .service(
                web::scope("/reports")
                    // /reports/charts/{chart}
                    .service(
                        web::resource("/charts/{chart}").route(web::get().to(reports::chart_png)),
                    )
                    .service(
                        web::resource("/grades.xlsx").route(web::get().to(reports::export_grades)),
                    )
                    .service(
                        web::resource("/attendance.xlsx")
                            .route(web::get().to(reports::export_attendance)),
                    ),
            ),
    );
}
