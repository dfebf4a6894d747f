/**
 * Comments
 *
 * Comment CRUD with per-role visibility: admins see and delete everything,
 * regular users only see and touch their own comments.
 */

pub mod db;
pub mod handlers;

pub use db::Comment;
