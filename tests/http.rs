#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, Response, StatusCode};
    use axum::Router;
    use todo_site::db::db::Db;
    use todo_site::libs::task::Task;
    use todo_site::web::{router, AppState};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};
    use tower::ServiceExt;

    /// A router over a fresh on-disk database, plus a handle for inspecting it.
    struct HttpTestContext {
        _temp_dir: TempDir,
        state: AppState,
        app: Router,
    }

    impl AsyncTestContext for HttpTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("todo_site.db")).unwrap();
            let state = AppState::new(db);
            let app = router(state.clone());
            HttpTestContext {
                _temp_dir: temp_dir,
                state,
                app,
            }
        }
    }

    impl HttpTestContext {
        async fn get(&self, uri: &str) -> Response<Body> {
            let request = Request::get(uri).body(Body::empty()).unwrap();
            self.app.clone().oneshot(request).await.unwrap()
        }

        async fn post(&self, uri: &str, form: &str) -> Response<Body> {
            let request = Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap();
            self.app.clone().oneshot(request).await.unwrap()
        }

        async fn create_task(&self, description: &str) -> Task {
            let description = description.to_string();
            self.state.with_db(move |db| Ok(db.tasks().insert(&description)?)).await.unwrap()
        }

        async fn tasks(&self) -> Vec<Task> {
            self.state.with_db(|db| Ok(db.tasks().list()?)).await.unwrap()
        }

        async fn get_task(&self, id: i64) -> Option<Task> {
            self.state.with_db(move |db| Ok(db.tasks().get(id)?)).await.unwrap()
        }

        async fn comment_bodies(&self, id: i64) -> Vec<String> {
            let comments = self.state.with_db(move |db| Ok(db.comments().list_for_task(id)?)).await.unwrap();
            comments.into_iter().map(|c| c.body).collect()
        }

        async fn tag_names(&self, id: i64) -> Vec<String> {
            let tags = self.state.with_db(move |db| Ok(db.tags().list_for_task(id)?)).await.unwrap();
            tags.into_iter().map(|t| t.name).collect()
        }

        async fn tag_count(&self) -> usize {
            self.state.with_db(|db| Ok(db.tags().list()?)).await.unwrap().len()
        }
    }

    fn location(response: &Response<Body>) -> &str {
        response.headers().get(header::LOCATION).unwrap().to_str().unwrap()
    }

    /// First `href` in `html` starting with `prefix`, HTML entities left as rendered.
    fn find_href<'a>(html: &'a str, prefix: &str) -> &'a str {
        let start = html.find(&format!("href=\"{}", prefix)).unwrap() + "href=\"".len();
        let end = start + html[start..].find('"').unwrap();
        &html[start..end]
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_list_page_shows_tasks(ctx: &mut HttpTestContext) {
        ctx.create_task("Write <docs>").await;

        let response = ctx.get("/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Write &lt;docs&gt;"));
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_create_task_redirects_to_list(ctx: &mut HttpTestContext) {
        let response = ctx.post("/", "description=Buy+milk").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");

        let tasks = ctx.tasks().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].description, "Buy milk");
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_create_blank_task_is_rejected(ctx: &mut HttpTestContext) {
        let response = ctx.post("/", "description=+++").await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("This field is required."));
        assert!(ctx.tasks().await.is_empty());
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_detail_page(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Plan sprint").await;

        let response = ctx.get(&format!("/task/{}", task.id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Plan sprint"));
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_missing_task_is_not_found(ctx: &mut HttpTestContext) {
        assert_eq!(ctx.get("/task/999").await.status(), StatusCode::NOT_FOUND);
        assert_eq!(ctx.get("/task/abc").await.status(), StatusCode::NOT_FOUND);

        let response = ctx.post("/task/999", "body=hi&action=add").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(ctx.tag_count().await, 0);
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_update_task(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Old").await;

        let response = ctx.post(&format!("/task/{}", task.id), "description=New&update=1").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(ctx.get_task(task.id).await.unwrap().description, "New");
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_update_wins_over_delete(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Keep me").await;

        let response = ctx.post(&format!("/task/{}", task.id), "description=Kept&update=1&delete=1").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(ctx.get_task(task.id).await.unwrap().description, "Kept");
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_invalid_update_rerenders_detail(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Original").await;

        let response = ctx.post(&format!("/task/{}", task.id), "description=&action=update").await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("This field is required."));
        assert_eq!(ctx.get_task(task.id).await.unwrap().description, "Original");
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_delete_task_cascades(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Doomed").await;
        let uri = format!("/task/{}", task.id);
        ctx.post(&uri, "body=note&action=add").await;
        ctx.post(&uri, "name=urgent&action=tag").await;

        let response = ctx.post(&uri, "action=delete").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert!(ctx.get_task(task.id).await.is_none());
        assert!(ctx.comment_bodies(task.id).await.is_empty());
        assert_eq!(ctx.tag_count().await, 1);
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_add_comment(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Discuss").await;
        let uri = format!("/task/{}", task.id);

        let response = ctx.post(&uri, "body=hello&add=1").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), uri);
        assert_eq!(ctx.comment_bodies(task.id).await, vec!["hello".to_string()]);
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_tag_twice_is_idempotent(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Tagged").await;
        let uri = format!("/task/{}", task.id);

        for _ in 0..2 {
            let response = ctx.post(&uri, "name=urgent&tag=1").await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(location(&response), uri);
        }

        assert_eq!(ctx.tag_names(task.id).await, vec!["urgent".to_string()]);
        assert_eq!(ctx.tag_count().await, 1);
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_unknown_control_redirects_without_changes(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Untouched").await;

        let response = ctx.post(&format!("/task/{}", task.id), "description=Changed&body=x&name=y").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(ctx.get_task(task.id).await.unwrap().description, "Untouched");
        assert!(ctx.comment_bodies(task.id).await.is_empty());
        assert_eq!(ctx.tag_count().await, 0);
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_tag_page(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Release").await;
        ctx.post(&format!("/task/{}", task.id), "name=ops+team&action=tag").await;

        let response = ctx.get("/tag/ops%20team").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Release"));

        assert_eq!(ctx.get("/tag/nothing").await.status(), StatusCode::NOT_FOUND);
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_unknown_route_is_not_found(ctx: &mut HttpTestContext) {
        let response = ctx.get("/no/such/page").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_blank_comment_is_rejected(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Quiet").await;

        let response = ctx.post(&format!("/task/{}", task.id), "body=&action=add").await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("This field is required."));
        assert!(ctx.comment_bodies(task.id).await.is_empty());
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_too_long_comment_keeps_submitted_value(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Verbose").await;
        let body = "x".repeat(2001);

        let response = ctx.post(&format!("/task/{}", task.id), &format!("body={}&action=add", body)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains(&format!(">{}</textarea>", body)));
        assert!(html.contains("Ensure this value has at most 2000 characters (it has 2001)."));
        assert!(ctx.comment_bodies(task.id).await.is_empty());
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_blank_tag_is_rejected(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Untagged").await;

        let response = ctx.post(&format!("/task/{}", task.id), "name=+&action=tag").await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("This field is required."));
        assert!(html.contains(r#"name="name" maxlength="50" value=" ""#));
        assert_eq!(ctx.tag_count().await, 0);
        assert!(ctx.tag_names(task.id).await.is_empty());
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_tag_link_with_slash_resolves(ctx: &mut HttpTestContext) {
        let task = ctx.create_task("Provision hosts").await;
        ctx.post(&format!("/task/{}", task.id), "name=ops%2Finfra&action=tag").await;

        let html = body_text(ctx.get(&format!("/task/{}", task.id)).await).await;
        let href = find_href(&html, "/tag/");
        assert_eq!(href, "/tag/ops%2Finfra");

        let response = ctx.get(href).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Tag: ops&#x2f;infra"));
        assert!(html.contains("Provision hosts"));
    }
}
