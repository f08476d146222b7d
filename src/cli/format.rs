use crate::domain::todo::Todo;

pub const SEPARATOR: &str = "----------------------------";

pub fn todo_to_string(todo: &Todo) -> String {
    let done = if todo.done { "Finished" } else { "Pending" };
    format!("ID: {}\nTitle: {}\nDescription: {}\nDone: {}\n", todo.id, todo.title, todo.description, done)
}

pub fn todos_to_string(todos: &[Todo]) -> String {
    todos.iter().map(todo_to_string).collect::<Vec<_>>().join(&format!("{SEPARATOR}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::todo::TodoId;

    fn todo(id: i64, title: &str, done: bool) -> Todo {
        Todo { id: TodoId(id), title: title.into(), description: format!("about {title}"), done }
    }

    #[test]
    fn renders_single_todo() {
        assert_eq!(
            todo_to_string(&todo(1, "Buy milk", false)),
            "ID: 1\nTitle: Buy milk\nDescription: about Buy milk\nDone: Pending\n"
        );
        assert!(todo_to_string(&todo(2, "x", true)).ends_with("Done: Finished\n"));
    }

    #[test]
    fn separates_multiple_todos() {
        let out = todos_to_string(&[todo(1, "a", false), todo(2, "b", true)]);
        assert_eq!(
            out,
            "ID: 1\nTitle: a\nDescription: about a\nDone: Pending\n\
             ----------------------------\n\
             ID: 2\nTitle: b\nDescription: about b\nDone: Finished\n"
        );
        assert_eq!(todos_to_string(&[]), "");
    }
}
