#[cfg(test)]
mod tests {
    use todo_site::db::db::Db;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct CommentTestContext {
        _temp_dir: TempDir,
        db: Db,
    }

    impl TestContext for CommentTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("todo_site.db")).unwrap();
            CommentTestContext { _temp_dir: temp_dir, db }
        }
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_add_comment(ctx: &mut CommentTestContext) {
        let task = ctx.db.tasks().insert("Task").unwrap();

        let comment = ctx.db.comments().insert(task.id, "hello").unwrap();

        assert_eq!(comment.task_id, task.id);
        assert_eq!(comment.body, "hello");
        let comments = ctx.db.comments().list_for_task(task.id).unwrap();
        assert_eq!(comments, vec![comment]);
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_comments_are_scoped_to_task(ctx: &mut CommentTestContext) {
        let a = ctx.db.tasks().insert("A").unwrap();
        let b = ctx.db.tasks().insert("B").unwrap();
        ctx.db.comments().insert(a.id, "a1").unwrap();
        ctx.db.comments().insert(a.id, "a2").unwrap();
        ctx.db.comments().insert(b.id, "b1").unwrap();

        let bodies: Vec<String> = ctx.db.comments().list_for_task(a.id).unwrap().into_iter().map(|c| c.body).collect();
        assert_eq!(bodies, vec!["a1", "a2"]);
        assert_eq!(ctx.db.comments().list_for_task(b.id).unwrap().len(), 1);
    }

    #[test_context(CommentTestContext)]
    #[test]
    fn test_comment_requires_existing_task(ctx: &mut CommentTestContext) {
        let err = ctx.db.comments().insert(404, "orphan").unwrap_err();
        assert!(err.to_string().contains("Task #404 not found"));
        assert_eq!(ctx.db.comments().list_for_task(404).unwrap().len(), 0);
    }
}
