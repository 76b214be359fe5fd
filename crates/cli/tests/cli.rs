use assert_cmd::Command;

fn stdout_of(args: &[&str]) -> String {
    let output = Command::cargo_bin("bookstore-cli")
        .unwrap()
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn help_lists_subcommands() {
    let help = stdout_of(&["--help"]);
    for command in ["serve", "schema", "ping"] {
        assert!(help.contains(command), "missing {command} in:\n{help}");
    }
}

#[test]
fn schema_prints_books_table() {
    let schema = stdout_of(&["schema"]);
    assert!(schema.contains("-- books/001_books_table"));
    assert!(schema.contains("CREATE TABLE IF NOT EXISTS books"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("bookstore-cli")
        .unwrap()
        .arg("migrate")
        .assert()
        .failure();
}
