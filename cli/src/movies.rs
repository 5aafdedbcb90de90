#![deny(missing_docs)]

//! # Movies Contract
//!
//! Schemas and routes of the Movies API, plus its default document metadata.

use apicontract_core::{
    ApiContract, AppResult, DocumentInfo, DuplicatePolicy, Field, GeneratorConfig,
    OperationDescriptor, ParameterDescriptor, RequestBodyDescriptor, ResponseDescriptor, Schema,
    Server,
};
use serde_json::json;

/// Default configuration: Movies API metadata, artifacts in the working directory.
pub fn default_config() -> GeneratorConfig {
    GeneratorConfig::new(
        DocumentInfo::new("Movies API", "0.0.1")
            .with_description("API for managing movies")
            .with_server(
                Server::new("http://localhost:3001").with_description("Local development server"),
            )
            .with_server(
                Server::new("https://movies-api.example.com")
                    .with_description("Production server"),
            ),
    )
}

fn movie() -> Schema {
    Schema::object(vec![
        Field::required(
            "id",
            Schema::string()
                .with_format("uuid")
                .with_example(json!("123e4567-e89b-12d3-a456-426614174000")),
        ),
        Field::required("name", Schema::string().with_example(json!("Inception"))),
        Field::required("year", Schema::integer().with_example(json!(2010))),
        Field::required("rating", Schema::number().with_example(json!(8.8))),
        Field::required(
            "director",
            Schema::string().with_example(json!("Christopher Nolan")),
        ),
    ])
}

fn movie_input() -> Vec<Field> {
    vec![
        Field::required("name", Schema::string().with_example(json!("Inception"))),
        Field::required("year", Schema::integer().with_example(json!(2010))),
        Field::required("rating", Schema::number().with_example(json!(8.8))),
        Field::required(
            "director",
            Schema::string().with_example(json!("Christopher Nolan")),
        ),
    ]
}

fn status(code: i64) -> Field {
    Field::required("status", Schema::integer().with_example(json!(code)))
}

fn error_body(code: i64, example: &str) -> Schema {
    Schema::object(vec![
        status(code),
        Field::required("error", Schema::string().with_example(json!(example))),
    ])
}

fn schemas() -> Vec<(&'static str, Schema)> {
    vec![
        ("Movie", movie()),
        ("CreateMovieRequest", Schema::object(movie_input())),
        (
            "CreateMovieResponse",
            Schema::object(vec![status(200), Field::required("data", Schema::reference("Movie"))]),
        ),
        (
            "ConflictMovieResponse",
            error_body(409, "Movie with name Inception already exists"),
        ),
        (
            "GetMovieResponse",
            Schema::any_of(vec![
                Schema::object(vec![
                    status(200),
                    Field::required("data", Schema::array(Schema::reference("Movie"))),
                ])
                .with_description("All movies, or every movie matching a name"),
                Schema::object(vec![
                    status(200),
                    Field::required("data", Schema::reference("Movie")),
                ])
                .with_description("A single movie"),
            ]),
        ),
        ("MovieNotFoundResponse", error_body(404, "Movie not found")),
        (
            "DeleteMovieResponse",
            Schema::object(vec![
                status(200),
                Field::required(
                    "message",
                    Schema::string().with_example(json!("Movie 1 has been deleted")),
                ),
            ]),
        ),
        (
            "UpdateMovieRequest",
            Schema::object(
                movie_input()
                    .into_iter()
                    .map(|f| Field::optional(f.name, f.schema))
                    .collect(),
            )
            .with_description("Fields to change; absent fields keep their value"),
        ),
        (
            "UpdateMovieResponse",
            Schema::object(vec![status(200), Field::required("data", Schema::reference("Movie"))]),
        ),
    ]
}

fn movie_id() -> ParameterDescriptor {
    ParameterDescriptor::path("id", Schema::string()).with_description("Movie ID")
}

fn json_response(description: &str, schema: &str) -> ResponseDescriptor {
    ResponseDescriptor::new(description).with_json(Schema::reference(schema))
}

fn not_found() -> ResponseDescriptor {
    json_response("Movie not found", "MovieNotFoundResponse")
}

fn invalid_body() -> ResponseDescriptor {
    ResponseDescriptor::new("Invalid request body or validation error")
}

fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::get("/")
            .with_summary("Health check")
            .with_response(
                200,
                ResponseDescriptor::new("Server is running").with_json(Schema::object(vec![
                    Field::optional(
                        "message",
                        Schema::string().with_example(json!("Server is running")),
                    ),
                ])),
            ),
        OperationDescriptor::get("/movies")
            .with_summary("Get all movies or filter by name")
            .with_description("Retrieve a list of all movies or filter by query parameter \"name\".")
            .with_parameter(
                ParameterDescriptor::query("name", Schema::string())
                    .with_description("Movie name to search for"),
            )
            .with_response(
                200,
                json_response(
                    "List of movies or a speicific movie if the \"name\" query parameter is provided",
                    "GetMovieResponse",
                ),
            )
            .with_response(
                404,
                json_response(
                    "Movie not found if the name provided does not match any movie",
                    "MovieNotFoundResponse",
                ),
            ),
        OperationDescriptor::get("/movies/{id}")
            .with_summary("Get a movie by ID")
            .with_description("Retrive a single movie by ID")
            .with_parameter(movie_id())
            .with_response(200, json_response("Movie found", "GetMovieResponse"))
            .with_response(404, not_found()),
        OperationDescriptor::post("/movies")
            .with_summary("Create a new movie")
            .with_description("Create a new movie with the provided details")
            .with_request_body(RequestBodyDescriptor::json(Schema::reference(
                "CreateMovieRequest",
            )))
            .with_response(
                200,
                json_response("Movie created successfully", "CreateMovieResponse"),
            )
            .with_response(400, invalid_body())
            .with_response(
                409,
                json_response("Movie already exists", "ConflictMovieResponse"),
            )
            .with_response(500, ResponseDescriptor::new("Unexpected error occurred")),
        OperationDescriptor::delete("/movies/{id}")
            .with_summary("Delete a movie by ID")
            .with_description("Delete a movie with the specified ID")
            .with_parameter(movie_id())
            .with_response(
                200,
                json_response("Movie {id} has been deleted", "DeleteMovieResponse"),
            )
            .with_response(404, not_found()),
        OperationDescriptor::put("/movies/{id}")
            .with_summary("Update a movie by ID")
            .with_description("Update the details of a movie with the specified ID")
            .with_parameter(movie_id())
            .with_request_body(RequestBodyDescriptor::json(Schema::reference(
                "UpdateMovieRequest",
            )))
            .with_response(
                200,
                json_response("Movie updated successfully", "UpdateMovieResponse"),
            )
            .with_response(400, invalid_body())
            .with_response(404, not_found())
            .with_response(500, ResponseDescriptor::new("Internal server error")),
    ]
}

/// Builds the full Movies contract.
///
/// Every schema and route is registered; all rejections come back in one
/// `Aggregate` error.
pub fn movies_contract(policy: DuplicatePolicy) -> AppResult<ApiContract> {
    let mut contract = ApiContract::with_policy(policy);
    contract.register_all(schemas(), operations())?;
    Ok(contract)
}
