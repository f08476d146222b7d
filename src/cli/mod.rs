//! `todocli`: one subcommand per service operation, plain-text output.

pub mod format;

use std::io::Write;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::application::todo_service::TodoService;
use crate::domain::todo::{TodoId, TodoPatch};
use format::{todo_to_string, todos_to_string};

#[derive(Parser, Debug)]
#[command(name = "todocli", version, about = "manage your todos")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// get all todos from the database
    Getall {
        /// `--done` lists finished todos, `--done=false` pending ones
        #[arg(short, long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        done: Option<bool>,
    },
    /// get a todo from the database
    Get { id: TodoId },
    /// create a todo in the database
    Create {
        #[arg(short, long, default_value = "")]
        title: String,
        #[arg(short, long, visible_alias = "desc", default_value = "")]
        description: String,
    },
    /// edit a todo in the database
    Edit {
        id: TodoId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long, visible_alias = "desc")]
        description: Option<String>,
    },
    /// mark a todo as done
    Done { id: TodoId },
    /// delete a todo from the database
    Delete { id: TodoId },
    /// delete all finished todos from the database
    DeleteFinished,
}

/// Runs one command against `service`, writing the rendered result to `out`.
pub async fn run<S: TodoService, W: Write>(service: &S, command: Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Getall { done } => {
            let todos = service.list(done).await?;
            writeln!(out, "{}", todos_to_string(&todos))?;
        }
        Commands::Get { id } => {
            let todo = service.get(id).await?;
            writeln!(out, "{}", todo_to_string(&todo))?;
        }
        Commands::Create { title, description } => {
            let todo = service.add(&title, &description).await?;
            writeln!(out, "Created todo:\n{}", todo_to_string(&todo))?;
        }
        Commands::Edit { id, title, description } => {
            let patch = TodoPatch { title, description };
            if patch.is_empty() {
                bail!("no --title or --description set; nothing to edit");
            }
            let mut todo = service.get(id).await?;
            patch.apply(&mut todo);
            let todo = service.edit(&todo).await?;
            writeln!(out, "Edited todo:\n{}", todo_to_string(&todo))?;
        }
        Commands::Done { id } => {
            let todo = service.get(id).await?;
            let todo = service.mark_as_done(&todo).await?;
            writeln!(out, "Todo marked as done:\n{}", todo_to_string(&todo))?;
        }
        Commands::Delete { id } => {
            let todo = service.get(id).await?;
            service.delete(&todo).await?;
            writeln!(out, "Todo deleted:\n{}", todo_to_string(&todo))?;
        }
        Commands::DeleteFinished => {
            let deleted = service.delete_finished().await?;
            writeln!(out, "Deleted {deleted} finished todo(s)")?;
        }
    }
    Ok(())
}
