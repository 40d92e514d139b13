//! OpenAPI description of the REST surface, served at `{prefix}/documentation`.

use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    None,
    Name,
    Step,
    StepList,
    Article,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    One(&'static str),
    Many(&'static str),
    NoContent,
}

struct Operation {
    method: &'static str,
    path: &'static str,
    tag: &'static str,
    operation_id: &'static str,
    summary: &'static str,
    body: Body,
    reply: Reply,
}

const fn op(
    method: &'static str,
    path: &'static str,
    tag: &'static str,
    operation_id: &'static str,
    summary: &'static str,
    body: Body,
    reply: Reply,
) -> Operation {
    Operation {
        method,
        path,
        tag,
        operation_id,
        summary,
        body,
        reply,
    }
}

#[rustfmt::skip]
const OPERATIONS: &[Operation] = &[
    op("get", "/projects", "Project", "api.projects.index", "List projects with tutorials, steps and articles", Body::None, Reply::Many("Project")),
    op("post", "/projects", "Project", "api.projects.store", "Store new project", Body::Name, Reply::One("Project")),
    op("get", "/projects/{id}", "Project", "api.projects.show", "Get project with tutorials, steps and articles", Body::None, Reply::One("Project")),
    op("put", "/projects/{id}", "Project", "api.projects.update", "Update project", Body::Name, Reply::One("Project")),
    op("delete", "/projects/{id}", "Project", "api.projects.destroy", "Delete project", Body::None, Reply::NoContent),
    op("get", "/projects/{projectId}/tutorials", "Tutorial", "api.tutorials.index", "List tutorials of a project", Body::None, Reply::Many("Tutorial")),
    op("post", "/projects/{projectId}/tutorials", "Tutorial", "api.tutorials.store", "Store new tutorial for a project", Body::Name, Reply::One("Tutorial")),
    op("get", "/tutorials/{id}", "Tutorial", "api.tutorials.show", "Get tutorial with project and steps", Body::None, Reply::One("Tutorial")),
    op("put", "/tutorials/{id}", "Tutorial", "api.tutorials.update", "Update tutorial", Body::Name, Reply::One("Tutorial")),
    op("delete", "/tutorials/{id}", "Tutorial", "api.tutorials.destroy", "Delete tutorial", Body::None, Reply::NoContent),
    op("get", "/tutorials/{tutorialId}/steps", "Step", "api.steps.index", "List steps of a tutorial", Body::None, Reply::Many("Step")),
    op("post", "/tutorials/{tutorialId}/steps", "Step", "api.steps.store", "Store new step for a tutorial", Body::Step, Reply::One("Step")),
    op("post", "/tutorials/{tutorialId}/steps-many", "Step", "api.steps.store.many", "Replace all steps of a tutorial", Body::StepList, Reply::Many("Step")),
    op("get", "/steps/{id}", "Step", "api.steps.show", "Get step with tutorial and project", Body::None, Reply::One("Step")),
    op("patch", "/steps/{id}", "Step", "api.steps.update", "Update step", Body::Step, Reply::One("Step")),
    op("delete", "/steps/{id}", "Step", "api.steps.destroy", "Delete step", Body::None, Reply::NoContent),
    op("get", "/projects/{projectId}/articles", "Article", "api.articles.index", "List articles of a project", Body::None, Reply::Many("Article")),
    op("post", "/projects/{projectId}/articles", "Article", "api.articles.store", "Store new article for a project", Body::Article, Reply::One("Article")),
    op("get", "/articles/{id}", "Article", "api.articles.show", "Get article with project", Body::None, Reply::One("Article")),
    op("patch", "/articles/{id}", "Article", "api.articles.update", "Update article", Body::Article, Reply::One("Article")),
    op("delete", "/articles/{id}", "Article", "api.articles.destroy", "Delete article", Body::None, Reply::NoContent),
];

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn path_parameters(path: &str) -> Vec<Value> {
    path.split('/')
        .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
        .map(|name| {
            json!({
                "name": name,
                "in": "path",
                "required": true,
                "schema": { "type": "integer" }
            })
        })
        .collect()
}

fn request_body(body: Body) -> Option<Value> {
    let schema = match body {
        Body::None => return None,
        Body::Name => schema_ref("NamePayload"),
        Body::Step => schema_ref("StepPayload"),
        Body::StepList => json!({ "type": "array", "items": schema_ref("StepPayload") }),
        Body::Article => schema_ref("ArticlePayload"),
    };
    Some(json!({
        "required": true,
        "content": { "application/json": { "schema": schema } }
    }))
}

fn operation(op: &Operation) -> Value {
    let error = json!({ "application/json": { "schema": schema_ref("ApiResponse") } });

    let mut responses = Map::new();
    match op.reply {
        Reply::One(name) => {
            responses.insert(
                "200".into(),
                json!({
                    "description": "Successful operation",
                    "content": { "application/json": { "schema": schema_ref(name) } }
                }),
            );
        }
        Reply::Many(name) => {
            responses.insert(
                "200".into(),
                json!({
                    "description": "Successful operation",
                    "content": { "application/json": {
                        "schema": { "type": "array", "items": schema_ref(name) }
                    } }
                }),
            );
        }
        Reply::NoContent => {
            responses.insert("204".into(), json!({ "description": "Successful operation" }));
        }
    }
    if op.path.contains('{') {
        responses.insert(
            "404".into(),
            json!({ "description": "Resource Not Found", "content": error.clone() }),
        );
    }
    if op.body != Body::None {
        responses.insert(
            "422".into(),
            json!({ "description": "Validation failed", "content": error }),
        );
    }

    let mut value = json!({
        "tags": [op.tag],
        "operationId": op.operation_id,
        "summary": op.summary,
        "parameters": path_parameters(op.path),
        "responses": responses,
    });
    if let Some(body) = request_body(op.body) {
        value["requestBody"] = body;
    }
    value
}

fn components() -> Value {
    let timestamps = json!({ "type": "string", "format": "date-time" });
    json!({
        "schemas": {
            "ContentDocument": {
                "type": "array",
                "description": "Rich-text document; stored and returned verbatim",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": { "type": "string", "example": "heading-one" },
                        "children": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "text": { "type": "string", "example": "Article title" }
                                }
                            }
                        }
                    }
                }
            },
            "NamePayload": {
                "type": "object",
                "required": ["name"],
                "properties": { "name": { "type": "string", "minLength": 1, "maxLength": 255 } }
            },
            "StepPayload": {
                "type": "object",
                "properties": {
                    "title": { "type": "string", "minLength": 1, "maxLength": 255 },
                    "order": { "type": "integer", "example": 1 },
                    "content": schema_ref("ContentDocument")
                }
            },
            "ArticlePayload": {
                "type": "object",
                "properties": {
                    "title": { "type": "string", "minLength": 1, "maxLength": 255 },
                    "content": schema_ref("ContentDocument")
                }
            },
            "Project": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer" },
                    "name": { "type": "string" },
                    "created_at": timestamps,
                    "updated_at": timestamps,
                    "tutorials": { "type": "array", "items": schema_ref("Tutorial") },
                    "articles": { "type": "array", "items": schema_ref("Article") }
                }
            },
            "Tutorial": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer" },
                    "name": { "type": "string" },
                    "project_id": { "type": "integer" },
                    "created_at": timestamps,
                    "updated_at": timestamps,
                    "project": schema_ref("Project"),
                    "steps": { "type": "array", "items": schema_ref("Step") }
                }
            },
            "Step": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer" },
                    "title": { "type": "string", "nullable": true },
                    "order": { "type": "integer", "nullable": true },
                    "content": schema_ref("ContentDocument"),
                    "tutorial_id": { "type": "integer" },
                    "created_at": timestamps,
                    "updated_at": timestamps,
                    "tutorial": schema_ref("Tutorial")
                }
            },
            "Article": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer" },
                    "title": { "type": "string" },
                    "content": schema_ref("ContentDocument"),
                    "project_id": { "type": "integer" },
                    "created_at": timestamps,
                    "updated_at": timestamps,
                    "project": schema_ref("Project")
                }
            },
            "ApiResponse": {
                "type": "object",
                "properties": {
                    "message": { "type": "string" },
                    "errors": {
                        "type": "object",
                        "additionalProperties": { "type": "array", "items": { "type": "string" } }
                    }
                }
            }
        }
    })
}

/// Build the OpenAPI 3 document with every path mounted under `prefix`.
pub fn document(prefix: &str) -> Value {
    let mut paths = Map::new();
    for op in OPERATIONS {
        let item = paths
            .entry(format!("{}{}", prefix, op.path))
            .or_insert_with(|| Value::Object(Map::new()));
        item[op.method] = operation(op);
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Help Center",
            "version": env!("CARGO_PKG_VERSION"),
            "license": {
                "name": "Apache 2.0",
                "url": "http://www.apache.org/licenses/LICENSE-2.0.html"
            }
        },
        "tags": [
            { "name": "Project", "description": "Projects supported by system" },
            { "name": "Tutorial", "description": "Tutorials available for a project" },
            { "name": "Step", "description": "Tutorial Step" },
            { "name": "Article", "description": "Project Article describing any specific feature" }
        ],
        "paths": paths,
        "components": components(),
    })
}
