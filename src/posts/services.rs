use tracing::info;

use super::models::*;
use super::validators;
use crate::common::{ApiError, AppState, Envelope};
use crate::persistence::{run_statement, Database, Statement};

/// How many posts the listing returns.
pub const RECENT_POSTS_LIMIT: i64 = 8;

const NO_SUCH_POST: &str = "post does not exist";

pub struct PostsService<'a> {
    state: &'a AppState,
}

impl<'a> PostsService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn db(&self) -> &dyn Database {
        self.state.db.as_ref()
    }

    /// A userId with no account is rejected by the foreign key and comes
    /// back as a 400 naming the user.
    pub async fn create(&self, request: &CreatePostRequest) -> Result<Envelope<()>, ApiError> {
        let input = validators::validate_create(request, &self.state.limits)?;

        let result = run_statement(
            self.db(),
            Statement::new("INSERT INTO post_tb (user_id, title, content) VALUES (?, ?, ?)")
                .bind(input.user_id)
                .bind(input.title)
                .bind(input.content),
        )
        .await
        .map_err(|e| ApiError::from(e).naming_reference("user"))?;

        if result.rows_affected == 0 {
            return Ok(Envelope::failure("post was not created"));
        }
        info!(user_id = input.user_id, "Post created");
        Ok(Envelope::done())
    }

    /// Most recent posts first. Posts created in the same millisecond fall
    /// back to id order.
    pub async fn list_recent(&self) -> Result<Envelope<Vec<PostSummary>>, ApiError> {
        let result = run_statement(
            self.db(),
            Statement::new(
                "SELECT post_tb.id, post_tb.title, post_tb.content, post_tb.created_date, \
                        user_tb.name AS author_name \
                 FROM post_tb \
                 JOIN user_tb ON post_tb.user_id = user_tb.id \
                 ORDER BY post_tb.created_date DESC, post_tb.id DESC \
                 LIMIT ?",
            )
            .bind(RECENT_POSTS_LIMIT),
        )
        .await?;

        let posts = result.all::<PostSummary>()?;
        if posts.is_empty() {
            return Ok(Envelope::failure("no posts yet"));
        }
        Ok(Envelope::success(posts))
    }

    pub async fn get(&self, post_id: Option<&str>) -> Result<Envelope<PostDetail>, ApiError> {
        let post_id = validators::validate_post_id(post_id, &self.state.limits)?;

        let result = run_statement(
            self.db(),
            Statement::new(
                "SELECT post_tb.id, post_tb.user_id, post_tb.title, post_tb.content, \
                        post_tb.created_date, user_tb.name AS author_name \
                 FROM post_tb \
                 JOIN user_tb ON post_tb.user_id = user_tb.id \
                 WHERE post_tb.id = ?",
            )
            .bind(post_id),
        )
        .await?;

        Ok(match result.first::<PostDetail>()? {
            Some(post) => Envelope::success(post),
            None => Envelope::failure(NO_SUCH_POST),
        })
    }

    /// Only the author can edit. A post owned by someone else looks the same
    /// as a post that does not exist.
    pub async fn edit(&self, request: &EditPostRequest) -> Result<Envelope<()>, ApiError> {
        let input = validators::validate_edit(request, &self.state.limits)?;

        let result = run_statement(
            self.db(),
            Statement::new("UPDATE post_tb SET title = ?, content = ? WHERE user_id = ? AND id = ?")
                .bind(input.title)
                .bind(input.content)
                .bind(input.user_id)
                .bind(input.post_id),
        )
        .await?;

        if result.rows_affected == 0 {
            return Ok(Envelope::failure(NO_SUCH_POST));
        }
        info!(post_id = input.post_id, user_id = input.user_id, "Post edited");
        Ok(Envelope::done())
    }

    pub async fn delete(&self, request: &DeletePostRequest) -> Result<Envelope<()>, ApiError> {
        let target = validators::validate_delete(request, &self.state.limits)?;

        let result = run_statement(
            self.db(),
            Statement::new("DELETE FROM post_tb WHERE id = ? AND user_id = ?")
                .bind(target.post_id)
                .bind(target.user_id),
        )
        .await?;

        if result.rows_affected == 0 {
            return Ok(Envelope::failure(NO_SUCH_POST));
        }
        info!(post_id = target.post_id, user_id = target.user_id, "Post deleted");
        Ok(Envelope::done())
    }
}
