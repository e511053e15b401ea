use super::error::AppError;
use super::templates::Templates;
use super::AppState;
use crate::db::comments::Comment;
use crate::db::db::Db;
use crate::db::tags::Tag;
use crate::libs::forms::{CommentForm, Control, DetailAction, FormErrors, FormFields, TagForm, TaskForm};
use crate::libs::messages::Message;
use crate::libs::task::Task;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Serialize;
use tracing::{debug, info};

const LIST_URL: &str = "/";

type RawForm = Form<Vec<(String, String)>>;

#[derive(Serialize)]
struct ListPage<'a> {
    tasks: &'a [Task],
    description: &'a str,
    errors: &'a FormErrors,
}

struct Detail {
    task: Task,
    comments: Vec<Comment>,
    tags: Vec<Tag>,
}

/// Values prefilled into the three detail-page forms.
#[derive(Serialize)]
struct DetailValues {
    description: String,
    body: String,
    tag_name: String,
}

impl DetailValues {
    fn for_task(task: &Task) -> Self {
        Self {
            description: task.description.clone(),
            body: String::new(),
            tag_name: String::new(),
        }
    }
}

#[derive(Serialize)]
struct DetailPage<'a> {
    task: &'a Task,
    comments: &'a [Comment],
    tags: &'a [Tag],
    #[serde(flatten)]
    values: &'a DetailValues,
    errors: &'a FormErrors,
}

#[derive(Serialize)]
struct TagPage<'a> {
    tag: &'a Tag,
    tasks: &'a [Task],
}

/// `GET /`: task list and create form.
pub async fn list_tasks(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let tasks = state.with_db(|db| Ok(db.tasks().list()?)).await?;
    render_list(&tasks, "", &FormErrors::default()).map(Html)
}

/// `POST /`: create a task and go back to the list.
pub async fn create_task(State(state): State<AppState>, Form(fields): RawForm) -> Result<Response, AppError> {
    let fields = FormFields::from(fields);

    match TaskForm::parse(&fields) {
        Ok(form) => {
            let task = state.with_db(move |db| Ok(db.tasks().insert(&form.description)?)).await?;
            info!(task_id = task.id, "{}", Message::TaskCreated(task.id));
            Ok(Redirect::to(LIST_URL).into_response())
        }
        Err(errors) => {
            let tasks = state.with_db(|db| Ok(db.tasks().list()?)).await?;
            let html = render_list(&tasks, fields.get(TaskForm::FIELD).unwrap_or_default(), &errors)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
    }
}

/// `GET /task/{id}`: task with its comments, tags and forms.
pub async fn task_detail(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Html<String>, AppError> {
    let id = parse_task_id(&raw_id)?;
    let detail = state.with_db(move |db| load_detail(db, id)).await?;
    let values = DetailValues::for_task(&detail.task);
    render_detail(&detail, &values, &FormErrors::default()).map(Html)
}

/// `POST /task/{id}`: dispatch on the submitted control.
///
/// `update`, `delete` and unrecognised submissions redirect to the list;
/// `add` and `tag` redirect back to the task.
pub async fn task_action(State(state): State<AppState>, Path(raw_id): Path<String>, Form(fields): RawForm) -> Result<Response, AppError> {
    let id = parse_task_id(&raw_id)?;
    let fields = FormFields::from(fields);

    match DetailAction::decode(&fields) {
        Ok(action) => {
            let location = state.with_db(move |db| apply_action(db, id, action)).await?;
            Ok(Redirect::to(&location).into_response())
        }
        Err(invalid) => {
            let detail = state.with_db(move |db| load_detail(db, id)).await?;
            let mut values = DetailValues::for_task(&detail.task);
            let submitted = |name: &str| fields.get(name).unwrap_or_default().to_string();
            match invalid.control {
                Control::Update => values.description = submitted(TaskForm::FIELD),
                Control::Add => values.body = submitted(CommentForm::FIELD),
                Control::Tag => values.tag_name = submitted(TagForm::FIELD),
                Control::Delete => {}
            }

            let html = render_detail(&detail, &values, &invalid.errors)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
    }
}

/// `GET /tag/{name}`: tasks carrying a tag.
pub async fn tag_detail(State(state): State<AppState>, Path(name): Path<String>) -> Result<Html<String>, AppError> {
    let (tag, tasks) = state
        .with_db(move |db| {
            let tag = db
                .tags()
                .get_by_name(&name)?
                .ok_or_else(|| AppError::NotFound(Message::TagNotFound(name.clone()).to_string()))?;
            let tasks = db.tasks().list_by_tag(tag.id)?;
            Ok((tag, tasks))
        })
        .await?;

    let html = Templates::shared().render("tag.html", TagPage { tag: &tag, tasks: &tasks })?;
    Ok(Html(html))
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no page at {}", uri.path()))
}

fn parse_task_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::NotFound(format!("no task '{}'", raw)))
}

fn task_not_found(id: i64) -> AppError {
    AppError::NotFound(Message::TaskNotFound(id).to_string())
}

fn load_detail(db: &Db, id: i64) -> Result<Detail, AppError> {
    let task = db.tasks().get(id)?.ok_or_else(|| task_not_found(id))?;
    Ok(Detail {
        comments: db.comments().list_for_task(id)?,
        tags: db.tags().list_for_task(id)?,
        task,
    })
}

/// Performs one detail-page action and returns the redirect target.
fn apply_action(db: &Db, id: i64, action: Option<DetailAction>) -> Result<String, AppError> {
    if !db.tasks().exists(id)? {
        return Err(task_not_found(id));
    }
    let detail_url = format!("/task/{}", id);

    match action {
        Some(DetailAction::Update(form)) => {
            db.tasks().update(id, &form.description)?;
            info!(task_id = id, "{}", Message::TaskUpdated(id));
            Ok(LIST_URL.to_string())
        }
        Some(DetailAction::Delete) => {
            db.tasks().delete(id)?;
            info!(task_id = id, "{}", Message::TaskDeleted(id));
            Ok(LIST_URL.to_string())
        }
        Some(DetailAction::AddComment(form)) => {
            let comment = db.comments().insert(id, &form.body)?;
            info!(task_id = id, comment_id = comment.id, "{}", Message::CommentAdded(comment.id, id));
            Ok(detail_url)
        }
        Some(DetailAction::AddTag(form)) => {
            let attachment = db.tags().attach(id, &form.name)?;
            if attachment.created {
                info!(tag_id = attachment.tag.id, "{}", Message::TagCreated(attachment.tag.name.clone()));
            }
            if attachment.linked {
                info!(task_id = id, tag_id = attachment.tag.id, "{}", Message::TagAttached(attachment.tag.name.clone(), id));
            } else {
                debug!(task_id = id, tag_id = attachment.tag.id, "{}", Message::TagAlreadyAttached(attachment.tag.name.clone(), id));
            }
            Ok(detail_url)
        }
        None => {
            debug!(task_id = id, "{}", Message::TaskActionIgnored(id));
            Ok(LIST_URL.to_string())
        }
    }
}

fn render_list(tasks: &[Task], description: &str, errors: &FormErrors) -> Result<String, AppError> {
    let page = ListPage { tasks, description, errors };
    Ok(Templates::shared().render("index.html", page)?)
}

fn render_detail(detail: &Detail, values: &DetailValues, errors: &FormErrors) -> Result<String, AppError> {
    let page = DetailPage {
        task: &detail.task,
        comments: &detail.comments,
        tags: &detail.tags,
        values,
        errors,
    };
    Ok(Templates::shared().render("detail.html", page)?)
}
