use owo_colors::OwoColorize;

use super::{connect, print_cancelled};
use crate::actions::{Confirm, Confirmed, create_comment, delete_comment, validate_comment};
use crate::display::format_comment;
use crate::error::Result;
use crate::types::{Comment, StudyId};

fn print_comments(comments: &[Comment]) {
    println!("{}", format!("댓글 ({})", comments.len()).bold());
    for comment in comments {
        println!("{}", format_comment(comment));
    }
}

pub async fn cmd_comment_add(study_id: StudyId, content: &str, anonymous: bool) -> Result<()> {
    // Checked before connecting so a bad comment never needs a login.
    validate_comment(content)?;
    let api = connect()?;
    let comments = create_comment(&api, study_id, content, anonymous).await?;
    print_comments(&comments);
    Ok(())
}

pub async fn cmd_comment_delete(
    study_id: StudyId,
    comment_id: u64,
    confirm: &mut impl Confirm,
) -> Result<()> {
    let api = connect()?;
    match delete_comment(&api, study_id, comment_id, confirm).await? {
        Confirmed::Done(comments) => print_comments(&comments),
        Confirmed::Cancelled => print_cancelled(),
    }
    Ok(())
}
