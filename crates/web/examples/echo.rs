use bytes::Bytes;
use conneg_web::{
    CodecRegistry, FormCodec, HandlerError, Pipeline, Rejection, Reply, RequestContext,
};
use http::{Method, Request, header};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Serialize)]
struct Item {
    name: String,
    stock: u32,
}

fn create_item(ctx: &RequestContext<'_>, body: Option<Value>) -> Result<Reply, HandlerError> {
    let Some(body) = body else {
        return Err(Rejection::bad_request("a request body is required").into());
    };

    let name = body["name"].as_str().unwrap_or("unnamed").to_string();
    info!(name = %name, negotiated = %ctx.negotiated(), "creating item");

    let item = Item { name, stock: 0 };
    Ok(Reply::with_status(
        http::StatusCode::CREATED,
        json!({ "created": serde_json::to_value(item).expect("item serializes") }),
    ))
}

fn print_response(label: &str, response: &http::Response<Bytes>) {
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");
    println!("== {label}: {} {content_type}", response.status());
    println!("{}", String::from_utf8_lossy(response.body()));
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let registry = CodecRegistry::default().append(FormCodec::new());
    let pipeline = Pipeline::new(registry);

    // a JSON client
    let request = Request::builder()
        .method(Method::POST)
        .uri("/items")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json")
        .body(Bytes::from(r#"{"name": "widget"}"#))
        .unwrap();
    print_response("json client", &pipeline.dispatch(&request, &create_item).unwrap());

    // a browser submitting a form, preferring the html rendering
    let request = Request::builder()
        .method(Method::POST)
        .uri("/items")
        .header(header::CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
        .header(header::ACCEPT, "text/html, application/json;q=0.9, */*;q=0.1")
        .body(Bytes::from("name=widget"))
        .unwrap();
    print_response("browser form", &pipeline.dispatch(&request, &create_item).unwrap());

    // a client nothing was registered for
    let request = Request::builder()
        .method(Method::GET)
        .uri("/items")
        .header(header::ACCEPT, "application/xml")
        .body(Bytes::new())
        .unwrap();
    print_response("xml client", &pipeline.dispatch(&request, &create_item).unwrap());
}
