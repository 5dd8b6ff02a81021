use crate::utils::error::AppError;
use rocket_okapi::okapi::openapi3::{Response, Responses, MediaType};
use rocket_okapi::response::OpenApiResponderInner;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::RefOr;
use okapi::openapi3::SchemaObject;
use indexmap::IndexMap;
use serde_json::json;

impl<'r> OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();

        // Define error responses
        let error_responses = [
            ("Bad Request", AppError::BadRequest("Invalid departure date format".to_string())),
            ("Validation Failed", AppError::ValidationError("All fields are required.".to_string())),
            ("Unauthorized", AppError::AuthError("Invalid credentials".to_string())),
            ("Conflict", AppError::Conflict("Username already exists".to_string())),
            ("InternalServerError", AppError::DatabaseError("Internal ServerError".to_string())),
        ];

        for (description, error) in error_responses {
            let code = error.status().code.to_string();
            // BadRequest and ValidationError share 400; keep the first example
            if responses.responses.contains_key(&code) {
                continue;
            }
            responses.responses.insert(
                code,
                RefOr::Object(Response {
                    description: description.to_string(),
                    content: {
                        let mut content = IndexMap::new();
                        content.insert(
                            "application/json".to_string(),
                            MediaType {
                                schema: Some(SchemaObject::default()),
                                example: Some(json!({
                                    "error": error.to_string()
                                })),
                                ..Default::default()
                            },
                        );
                        content
                    },
                    ..Default::default()
                }),
            );
        }

        Ok(responses)
    }
}
