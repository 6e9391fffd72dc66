//! Interactive API documentation: a Swagger UI page at `/` backed by the
//! OpenAPI document served from `/swagger.json`.

use axum::{Json, response::Html};
use serde_json::{Value, json};

pub async fn swagger_ui() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>movieshelf API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        body {
            margin: 0;
            background: #fafafa;
        }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            SwaggerUIBundle({
                url: '/swagger.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
            });
        };
    </script>
</body>
</html>
"#,
    )
}

pub async fn openapi_spec() -> Json<Value> {
    Json(openapi_document())
}

fn id_param(description: &str) -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": description,
        "schema": { "type": "integer" }
    })
}

fn named_body(required: &[&str]) -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": {
                    "type": "array",
                    "description": "Only the first element is read",
                    "items": {
                        "type": "object",
                        "required": required,
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string", "nullable": true }
                        }
                    }
                }
            }
        }
    })
}

/// Create/update/delete operations shared by `/genres/{id}` and `/directors/{id}`.
fn named_item(tag: &str, noun: &str) -> Value {
    json!({
        "parameters": [id_param(&format!("{noun} id"))],
        "post": {
            "tags": [tag],
            "summary": format!("Create a {noun}; the row takes the id from the body"),
            "requestBody": named_body(&["id", "name"]),
            "responses": { "204": { "description": "Created" } }
        },
        "put": {
            "tags": [tag],
            "summary": format!("Rename a {noun}"),
            "requestBody": named_body(&["name"]),
            "responses": {
                "204": { "description": "Updated" },
                "404": { "description": format!("No such {noun}") }
            }
        },
        "delete": {
            "tags": [tag],
            "summary": format!("Delete a {noun}"),
            "responses": {
                "204": { "description": "Deleted" },
                "404": { "description": format!("No such {noun}") }
            }
        }
    })
}

pub fn openapi_document() -> Value {
    let filter = |name: &str| {
        json!({
            "name": name,
            "in": "query",
            "required": false,
            "schema": { "type": "string" }
        })
    };

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "movieshelf",
            "version": env!("CARGO_PKG_VERSION")
        },
        "tags": [
            { "name": "movies" },
            { "name": "directors" },
            { "name": "genres" }
        ],
        "paths": {
            "/movies/": {
                "get": {
                    "tags": ["movies"],
                    "summary": "List movies, optionally filtered by director and/or genre",
                    "parameters": [filter("director_id"), filter("genre_id")],
                    "responses": {
                        "200": {
                            "description": "Matching movies",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Movie" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/movies/{id}": {
                "get": {
                    "tags": ["movies"],
                    "summary": "Get one movie",
                    "parameters": [id_param("movie id")],
                    "responses": {
                        "200": {
                            "description": "The movie",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Movie" }
                                }
                            }
                        },
                        "404": { "description": "No such movie" }
                    }
                }
            },
            "/genres/{id}": named_item("genres", "genre"),
            "/directors/{id}": named_item("directors", "director")
        },
        "components": {
            "schemas": {
                "Movie": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "title": { "type": "string", "nullable": true },
                        "description": { "type": "string", "nullable": true },
                        "trailer": { "type": "string", "nullable": true },
                        "year": { "type": "integer", "nullable": true },
                        "rating": { "type": "number", "nullable": true },
                        "genre_id": { "type": "integer", "nullable": true },
                        "director_id": { "type": "integer", "nullable": true }
                    }
                }
            }
        }
    })
}
