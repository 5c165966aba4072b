use std::io::{BufRead, Write};

use crate::column::ColumnEdit;
use crate::controller::Controller;
use crate::draft::TableDraftInterface;
use crate::render;
use crate::schema::{Column, DataAttribute};
use crate::service::SchemaService;
// shell.rs

const HELP: &str = "\
tables                          list tables
select <table>                  select a table and show it
show                            show the selected table
new                             start a new table draft
name <table>                    set the draft table name
col add                         add a column to the draft
col rm <n>                      remove draft column n
col set <n> name|type <value>   edit draft column n
col toggle <n> <attribute>      toggle an attribute on draft column n
draft                           show the draft
save                            create the drafted table
cancel                          discard the draft
rename <new_name>               rename the selected table
drop                            delete the selected table
addcol <name:type[:attr,attr]>  add a column to the selected table
dropcol <column>                delete a column from the selected table
quit                            leave";

/// Runs the interactive loop until `quit` or end of input.
pub async fn run<S, R, W>(controller: &mut Controller<S>, input: R, mut out: W) -> std::io::Result<()>
where
    S: SchemaService,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Welcome to schemadesk. Type 'help' for commands, 'quit' to leave.")?;
    write!(out, "{}", render::table_list(controller.registry()))?;

    let mut lines = input.lines();
    loop {
        write!(out, "schemadesk> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            writeln!(out, "Goodbye!")?;
            break;
        }
        if !line.is_empty() {
            execute_line(controller, line, &mut out).await?;
        }
    }
    Ok(())
}

/// Executes one shell command. Operation failures are reported through the
/// controller's notifier, so only usage problems are written here.
pub async fn execute_line<S, W>(controller: &mut Controller<S>, line: &str, out: &mut W) -> std::io::Result<()>
where
    S: SchemaService,
    W: Write,
{
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["help"] => writeln!(out, "{}", HELP)?,
        ["tables"] => write!(out, "{}", render::table_list(controller.registry()))?,
        ["select", name] => {
            if let Ok(table) = controller.select_table(name) {
                write!(out, "{}", render::table_detail(table))?;
            }
        }
        ["show"] => match controller.registry().selected() {
            Some(table) => write!(out, "{}", render::table_detail(table))?,
            None => writeln!(out, "Select a table to view details")?,
        },
        ["new"] => controller.begin_new_table(),
        ["name", rest @ ..] => controller.draft_mut().set_table_name(&rest.join(" ")),
        ["col", "add"] => controller.draft_mut().add_column(),
        ["col", "rm", n] => match n.parse::<usize>() {
            Ok(index) => {
                let _ = controller.remove_draft_column(index);
            }
            Err(_) => writeln!(out, "Invalid column number: {}", n)?,
        },
        ["col", "set", n, field, value @ ..] => {
            let edit = ColumnEdit::parse(field, &value.join(" "));
            match (n.parse::<usize>(), edit) {
                (Ok(index), Ok(edit)) => {
                    if let Err(err) = controller.draft_mut().edit_column(index, edit) {
                        writeln!(out, "{}", err)?;
                    }
                }
                (Err(_), _) => writeln!(out, "Invalid column number: {}", n)?,
                (_, Err(err)) => writeln!(out, "{}", err)?,
            }
        }
        ["col", "toggle", n, attribute] => {
            match (n.parse::<usize>(), attribute.parse::<DataAttribute>()) {
                (Ok(index), Ok(attribute)) => {
                    if let Err(err) = controller.draft_mut().toggle_column_attribute(index, attribute) {
                        writeln!(out, "{}", err)?;
                    }
                }
                (Err(_), _) => writeln!(out, "Invalid column number: {}", n)?,
                (_, Err(err)) => writeln!(out, "{}", err)?,
            }
        }
        ["draft"] => {
            let draft = controller.draft();
            writeln!(out, "Table name: {}", draft.table_name)?;
            for (i, column) in draft.columns.iter().enumerate() {
                writeln!(
                    out,
                    "{:>3}  {:<20} {:<10} {}",
                    i,
                    column.name,
                    column.data_type,
                    column.attributes.joined()
                )?;
            }
        }
        ["save"] => {
            let _ = controller.create_table().await;
        }
        ["cancel"] => controller.dismiss_create_form(),
        ["rename", new_name] => {
            if controller.show_rename_form().is_ok() {
                controller.set_rename_input(new_name);
                if controller.rename_table().await.is_err() {
                    controller.cancel_rename();
                }
            }
        }
        ["drop"] => match controller.registry().selected().map(|t| t.table_name.clone()) {
            Some(name) => {
                let _ = controller.delete_table(&name).await;
            }
            None => writeln!(out, "Select a table first")?,
        },
        ["addcol", spec] => match spec.parse::<Column>() {
            Ok(column) => {
                controller.edit_new_column(ColumnEdit::SetName(column.name.clone()));
                controller.edit_new_column(ColumnEdit::SetType(column.data_type));
                for attribute in DataAttribute::ALL {
                    let wanted = column.attributes.contains(attribute);
                    if controller.new_column().attributes.contains(attribute) != wanted {
                        controller.toggle_new_column_attribute(attribute);
                    }
                }
                let _ = controller.submit_new_column().await;
            }
            Err(err) => writeln!(out, "{}", err)?,
        },
        ["dropcol", column] => match controller.registry().selected().map(|t| t.table_name.clone()) {
            Some(name) => {
                let _ = controller.delete_column(&name, column).await;
            }
            None => writeln!(out, "Select a table first")?,
        },
        _ => writeln!(out, "Unknown command: {} (try 'help')", line)?,
    }
    Ok(())
}
