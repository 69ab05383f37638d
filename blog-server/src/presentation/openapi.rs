use utoipa::OpenApi;

use crate::presentation::handlers::careers::{CareerApplicationDto, CareersResponseDto};
use crate::presentation::handlers::posts::{AuthorDto, PostDto};

#[derive(OpenApi)]
#[openapi(
    info(title = "blog-server", description = "Read API for blog posts and the careers form relay"),
    paths(
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::latest_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::careers::submit_application
    ),
    components(
        schemas(
            AuthorDto,
            PostDto,
            CareerApplicationDto,
            CareersResponseDto
        )
    ),
    tags(
        (name = "posts", description = "Published posts"),
        (name = "careers", description = "Job applications")
    )
)]
pub(crate) struct ApiDoc;
