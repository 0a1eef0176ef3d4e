use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base},
};

fn not_found_view() -> Markup {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-7xl font-extrabold text-blue-600 dark:text-blue-500 mb-4" { "404" }
            p class="text-3xl font-bold mb-4" { "Page not found" }
            p class="text-lg text-gray-500 dark:text-gray-400 mb-8"
            {
                "The page you are looking for does not exist."
            }
            a href=(endpoints::ROOT) class=(BUTTON_PRIMARY_STYLE) { "Back to the dashboard" }
        }
    };

    base("Not Found", &[], &content)
}

pub async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, not_found_view()).into_response()
}
