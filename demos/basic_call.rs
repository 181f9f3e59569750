//! Basic demo of path parameters, query strings and JSON bodies.
//!
//! This demo shows how to:
//! - Create a client with default headers
//! - Fill a path template and query string for a GET request
//! - Send a JSON body with a POST request
//! - Read the response status, headers and body
//!
//! Run with: `cargo run --example basic_call`

use rip::{Client, Error, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("rip=debug,basic_call=info")
        .init();

    let client = Client::builder()
        .base_url("https://jsonplaceholder.typicode.com")?
        .default_header("Accept", "application/json")?
        .build()?;

    println!("=== GET with a path template ===");
    let mut response = client
        .request()
        .set_params([("id", 1)])
        .get("/posts/:id")?;

    println!("URL: {}", response.request().url());
    println!("Status: {:?}", response.status());
    let post: Post = response.json()?;
    println!("Title: {}", post.title);
    println!();

    println!("=== GET with a query string ===");
    let mut response = client
        .request()
        .set_query([("userId", Value::from(1)), ("_limit", Value::from(2))])
        .get("/posts")?;

    println!("URL: {}", response.request().url());
    let posts: Vec<Post> = response.json()?;
    println!("Fetched {} posts", posts.len());
    println!();

    println!("=== POST with a JSON body ===");
    let new_post = NewPost {
        title: "My New Post".to_string(),
        body: "This is the content of my new post!".to_string(),
        user_id: 1,
    };

    let mut response = client.request().set_json(&new_post).post("/posts")?;

    println!("Status: {}", response.status_code());
    println!("Content-Type: {:?}", response.header("content-type"));
    println!("Body: {}", response.text()?);
    println!("Body again (already consumed): {:?}", response.text()?);

    println!();
    println!("=== Error status is still a response ===");
    let mut response = client.request().get("/does-not-exist")?;
    println!("is_error: {}", response.is_error());
    response.close();

    Ok(())
}
