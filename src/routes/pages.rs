use axum::response::{Html, IntoResponse};
use tera::Context;

pub async fn index() -> impl IntoResponse {
    render_template("index.html", Context::new())
}

fn render_template(name: &str, ctx: Context) -> Html<String> {
    let tera = crate::templates::get_tera();
    let rendered = tera
        .render(name, &ctx)
        .unwrap_or_else(|_| format!("Template error: {}", name));
    Html(rendered)
}
