use utoipa::openapi::path::{OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathItemType};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{ObjectBuilder, SchemaType};
use utoipa::openapi::{ContentBuilder, Ref, Required, ResponseBuilder};
use utoipa::{OpenApi, ToSchema};

use models::catalog::{OptionKind, OPTION_KINDS};

use crate::dto::{CreateOptionRequest, OptionKindResponse, OptionResponse, UpdateOptionRequest};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct EnvelopeDoc { pub message: String, pub status: String, pub timestamp: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub detail: Option<String>, pub status: u16, pub timestamp: String }

#[derive(OpenApi)]
#[openapi(
    paths(crate::routes::health, crate::routes::catalog),
    components(schemas(
        HealthResponse,
        EnvelopeDoc,
        ErrorDoc,
        OptionKindResponse,
        OptionResponse,
        CreateOptionRequest,
        UpdateOptionRequest,
    )),
    tags((name = "health"), (name = "catalog"))
)]
pub struct ApiDoc;

const CREATE: &str = "CreateOptionRequest";
const UPDATE: &str = "UpdateOptionRequest";

enum Body {
    None,
    One(&'static str),
    Many(&'static str),
}

enum Param {
    None,
    QueryId,
    QueryIdList,
    PathId,
}

enum Reply {
    Envelope,
    One,
    Many,
}

/// Documentation of one route relative to a kind's base path.
struct RouteDoc {
    method: PathItemType,
    path: &'static str,
    op: &'static str,
    summary: &'static str,
    body: Body,
    param: Param,
    reply: Reply,
}

fn route(method: PathItemType, path: &'static str, op: &'static str, summary: &'static str) -> RouteDoc {
    RouteDoc { method, path, op, summary, body: Body::None, param: Param::None, reply: Reply::Envelope }
}

impl RouteDoc {
    fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    fn param(mut self, param: Param) -> Self {
        self.param = param;
        self
    }

    fn reply(mut self, reply: Reply) -> Self {
        self.reply = reply;
        self
    }
}

fn route_docs() -> Vec<RouteDoc> {
    use PathItemType::{Get, Post, Put};
    vec![
        route(Post, "/create/one", "create_one", "Create one record").body(Body::One(CREATE)),
        route(Post, "/create/many", "create_many", "Create many records atomically").body(Body::Many(CREATE)),
        route(Get, "/read/one", "read_one", "Read one active record")
            .param(Param::QueryId)
            .reply(Reply::One),
        route(Get, "/read/all", "read_all", "Read all active records").reply(Reply::Many),
        route(Get, "/read/hard/all", "read_hard_all", "Read all records including soft-deleted").reply(Reply::Many),
        route(Post, "/read/many", "read_many", "Read active records by id")
            .param(Param::QueryIdList)
            .reply(Reply::Many),
        route(Put, "/update/one", "update_one", "Update one active record").body(Body::One(UPDATE)),
        route(Put, "/update/many", "update_many", "Update many active records").body(Body::Many(UPDATE)),
        route(Put, "/update/hard/one", "update_hard_one", "Update one record in any state").body(Body::One(UPDATE)),
        route(Put, "/update/hard/all", "update_hard_all", "Update many records in any state").body(Body::Many(UPDATE)),
        route(Put, "/soft/delete/one", "soft_delete_one", "Soft-delete one record").param(Param::QueryId),
        route(Put, "/soft/delete/many", "soft_delete_many", "Soft-delete many records").param(Param::QueryIdList),
        route(Get, "/hard/delete", "hard_delete_query", "Permanently delete one record").param(Param::QueryId),
        route(Get, "/hard/delete/{id}", "hard_delete_path", "Permanently delete one record").param(Param::PathId),
        route(Get, "/hard/delete/many", "hard_delete_many", "Permanently delete many records")
            .param(Param::QueryIdList),
        route(Get, "/hard/delete/all", "hard_delete_all", "Permanently delete every record"),
    ]
}

fn schema_ref(name: &str) -> Ref { Ref::from_schema_name(name) }

fn json_content(name: &str, many: bool) -> utoipa::openapi::Content {
    let builder = ContentBuilder::new();
    if many {
        builder.schema(utoipa::openapi::schema::ArrayBuilder::new().items(schema_ref(name))).build()
    } else {
        builder.schema(schema_ref(name)).build()
    }
}

fn string_param(name: &str, location: ParameterIn, description: &str) -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(location)
        .required(Required::True)
        .description(Some(description))
        .schema(Some(ObjectBuilder::new().schema_type(SchemaType::String)))
        .build()
}

fn json_body(name: &str, many: bool) -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .content("application/json", json_content(name, many))
        .required(Some(Required::True))
        .build()
}

fn json_response(description: &str, schema: &str, many: bool) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", json_content(schema, many))
        .build()
}

fn kind_paths(doc: &mut utoipa::openapi::OpenApi, kind: &OptionKind) {
    for route in route_docs() {
        let mut operation = OperationBuilder::new()
            .operation_id(Some(format!("{}_{}", kind.slug, route.op)))
            .summary(Some(format!("{}: {}", kind.title, route.summary)))
            .tag(kind.slug);

        operation = match route.param {
            Param::None => operation,
            Param::QueryId => operation.parameter(string_param("id", ParameterIn::Query, "Record id")),
            Param::QueryIdList => {
                operation.parameter(string_param("id_list", ParameterIn::Query, "Comma separated ids (alias idList)"))
            }
            Param::PathId => operation.parameter(string_param("id", ParameterIn::Path, "Record id")),
        };

        operation = match route.body {
            Body::None => operation,
            Body::One(name) => operation.request_body(Some(json_body(name, false))),
            Body::Many(name) => operation.request_body(Some(json_body(name, true))),
        };

        let ok = match route.reply {
            Reply::Envelope => json_response("OK", "EnvelopeDoc", false),
            Reply::One => json_response("OK", "OptionResponse", false),
            Reply::Many => json_response("OK", "OptionResponse", true),
        };
        operation = operation
            .response("200", ok)
            .response("400", json_response("Invalid or missing input", "ErrorDoc", false))
            .response("404", json_response("Record not found", "ErrorDoc", false))
            .response("409", json_response("Already exists or already deleted", "ErrorDoc", false))
            .response("500", json_response("Database error", "ErrorDoc", false));

        let path = format!("{}{}", kind.base_path(), route.path);
        doc.paths.paths.insert(path, PathItem::new(route.method, operation.build()));
    }
}

/// The static document plus the generated paths of every catalogue kind.
pub fn build_openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    for kind in OPTION_KINDS {
        kind_paths(&mut doc, kind);
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_kind() {
        let doc = build_openapi();
        assert!(doc.paths.paths.contains_key("/health"));
        for kind in OPTION_KINDS {
            assert!(doc.paths.paths.contains_key(&format!("{}/create/one", kind.base_path())));
            assert!(doc.paths.paths.contains_key(&format!("{}/hard/delete/{{id}}", kind.base_path())));
        }
        assert_eq!(doc.paths.paths.len(), 2 + OPTION_KINDS.len() * route_docs().len());
    }
}
