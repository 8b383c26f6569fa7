use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run, stderr, stdout};

const APP_JS: &str = "\
function minErr(module) {
  return function () { return new Error('verbose ' + module); };
}
var ngMinErr = minErr('ng');
ngMinErr('areq', 'Argument {0} is required', name);
minErr('$compile')('ctreq', 'Controller {0} required by {1}', a, b);
";

#[test]
fn test_extract_writes_output_and_messages() -> Result<()> {
    let test = CliTest::with_file("src/app.js", APP_JS)?;

    let output = run({
        let mut cmd = test.extract_command("src/app.js");
        cmd.args(["-o", "build/app.js"]);
        cmd
    })?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Extracted 2 templates in 2 namespaces from src/app.js"));

    let messages = test.read_file("errors.json")?;
    assert_eq!(
        messages,
        r#"{"ng":{"areq":"Argument {0} is required"},"$compile":{"ctreq":"Controller {0} required by {1}"}}"#
    );

    let program = test.read_file("build/app.js")?;
    assert!(program.contains("ngMinErr('areq', name)") || program.contains("ngMinErr(\"areq\", name)"));
    assert!(!program.contains("Argument {0} is required"));
    assert!(!program.contains("Controller {0} required by {1}"));
    // Left alone without a replacement
    assert!(program.contains("verbose "));

    Ok(())
}

#[test]
fn test_extract_prints_program_to_stdout() -> Result<()> {
    let test = CliTest::with_file("app.js", "fooMinErr('one', 'Too many {0}', 'hippies');\n")?;

    let output = run(test.extract_command("app.js"))?;

    assert_eq!(output.status.code(), Some(0));
    let program = stdout(&output);
    assert!(program.contains("fooMinErr"));
    assert!(!program.contains("Too many"));
    // Diagnostics and the summary stay off stdout
    assert!(!program.contains("Extracted"));
    assert!(stderr(&output).contains("Extracted 1 template in 1 namespace"));

    assert_eq!(
        test.read_file("errors.json")?,
        r#"{"foo":{"one":"Too many {0}"}}"#
    );

    Ok(())
}

#[test]
fn test_extract_abort_writes_nothing() -> Result<()> {
    let test = CliTest::with_file(
        "app.js",
        "fooMinErr('one', 'Too many {0}', 'hippies');\nbarMinErr('two', message);\n",
    )?;

    let mut cmd = test.extract_command("app.js");
    cmd.args(["-o", "out.js"]);

    assert_cmd_snapshot!(cmd, @r"
    success: false
    exit_code: 1
    ----- stdout -----
    error: minErr message argument must be a string literal or a concatenation of string literals  unsupported-string-expression
      --> app.js:2:18
      |
    2 | barMinErr('two', message);
      |                  ^
      = hint: inline the message of this 'bar' error as a literal string

    ✘ 1 problems (1 error, 0 warnings)

    ----- stderr -----
    ");
    assert!(!test.exists("errors.json"));
    assert!(!test.exists("out.js"));

    Ok(())
}

#[test]
fn test_extract_reports_parse_error() -> Result<()> {
    let test = CliTest::with_file("broken.js", "fooMinErr('one', 'Two' +);\n")?;

    // Parser wording and error position follow swc.
    insta::with_settings!({
        filters => vec![
            (r"error: .+  parse-error", "error: [MESSAGE]  parse-error"),
            (r"broken\.js:\d+:\d+", "broken.js:[POS]"),
            (r"  \| +\^", "  | [CARET]"),
        ]
    }, {
        assert_cmd_snapshot!(test.extract_command("broken.js"), @r"
        success: false
        exit_code: 1
        ----- stdout -----

        ----- stderr -----
        error: [MESSAGE]  parse-error
          --> broken.js:[POS]
          |
        1 | fooMinErr('one', 'Two' +);
          | [CARET]

        ✘ 1 problems (1 error, 0 warnings)
        ");
    });
    assert!(!test.exists("errors.json"));

    Ok(())
}

#[test]
fn test_extract_warnings_do_not_fail() -> Result<()> {
    let test = CliTest::with_file(
        "app.js",
        "throw new Error(fooMinErr('a', 'Wrapped {0}', x));\nfooMinErr('b', 'Kept');\n",
    )?;

    let mut cmd = test.extract_command("app.js");
    cmd.args(["-o", "out.js"]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: minErr already returns an error object; 'foo' error 'a' should be thrown directly  throw-is-not-minerr-error
      --> app.js:1:17
      |
    1 | throw new Error(fooMinErr('a', 'Wrapped {0}', x));
      |                 ^
      = hint: replace `throw new Error(minErrCall)` with `throw minErrCall`

    ✘ 1 problems (0 errors, 1 warning)
    ✓ Extracted 1 template in 1 namespace from app.js

    ----- stderr -----
    ");

    assert_eq!(test.read_file("errors.json")?, r#"{"foo":{"b":"Kept"}}"#);
    assert!(test.read_file("out.js")?.contains("Wrapped {0}"));

    Ok(())
}

#[test]
fn test_extract_substitutes_replacement() -> Result<()> {
    let test = CliTest::with_file(
        "app.js",
        "function minErr(module) {\n  console.log('This should be ripped out.');\n}\n",
    )?;
    test.write_file(
        "minErr.prod.js",
        "function minErr(module) {\n  return new RegExp(module + '\\\\d+');\n}\n",
    )?;

    let output = run({
        let mut cmd = test.extract_command("app.js");
        cmd.args(["-o", "out.js", "--replacement", "minErr.prod.js"]);
        cmd
    })?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let program = test.read_file("out.js")?;
    assert!(!program.contains("ripped out"));
    assert!(program.contains("new RegExp(module + "));
    assert!(program.contains("\\\\d+"));
    assert_eq!(test.read_file("errors.json")?, "{}");

    Ok(())
}

#[test]
fn test_extract_invalid_replacement_is_internal_error() -> Result<()> {
    let test = CliTest::with_file("app.js", "fooMinErr('a', 'b');\n")?;
    test.write_file("minErr.prod.js", "var minErr = 1;\n")?;

    let output = run({
        let mut cmd = test.extract_command("app.js");
        cmd.args(["--replacement", "minErr.prod.js"]);
        cmd
    })?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid minErr replacement definition"));
    assert!(!test.exists("errors.json"));

    Ok(())
}

#[test]
fn test_extract_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".minerrrc.json",
        r#"{
  "factoryName": "makeError",
  "suffix": "Error",
  "replacement": "prod/makeError.js",
  "messagesOutput": "dist/messages.json"
}"#,
    )?;
    test.write_file(
        "prod/makeError.js",
        "function makeError(ns) { return function (code) { return new Error(ns + code); }; }\n",
    )?;
    test.write_file(
        "src/app.js",
        "function makeError(ns) { return null; }\nhttpError('timeout', 'Timed out after {0}ms', ms);\n",
    )?;

    let output = run({
        let mut cmd = test.extract_command("src/app.js");
        cmd.args(["-o", "dist/app.js"]);
        cmd
    })?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("dist/messages.json")?,
        r#"{"http":{"timeout":"Timed out after {0}ms"}}"#
    );
    let program = test.read_file("dist/app.js")?;
    assert!(program.contains("return new Error(ns + code)"));
    assert!(!program.contains("Timed out"));

    Ok(())
}

#[test]
fn test_extract_flags_override_config() -> Result<()> {
    let test = CliTest::with_file(".minerrrc.json", r#"{ "suffix": "Error" }"#)?;
    test.write_file("app.js", "fooErr('a', 'Flag suffix');\nfooError('b', 'Config suffix');\n")?;

    let output = run({
        let mut cmd = test.extract_command("app.js");
        cmd.args(["-o", "out.js", "--suffix", "Err", "--messages", "m.json"]);
        cmd
    })?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_file("m.json")?, r#"{"foo":{"a":"Flag suffix"}}"#);
    assert!(!test.exists("errors.json"));

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_internal_error() -> Result<()> {
    let test = CliTest::with_file(".minerrrc.json", r#"{ "factoryName": "min-err" }"#)?;
    test.write_file("app.js", "fooMinErr('a', 'b');\n")?;

    let output = run(test.extract_command("app.js"))?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("factoryName"));

    Ok(())
}

#[test]
fn test_extract_verbose_prints_stats() -> Result<()> {
    let test = CliTest::with_file("app.js", "fooMinErr('a', 'b');\nthrow barMinErr('c', 'd');\n")?;

    let output = run({
        let mut cmd = test.extract_command("app.js");
        cmd.args(["-o", "out.js", "-v"]);
        cmd
    })?;

    assert_eq!(output.status.code(), Some(0));
    let err = stderr(&output);
    assert!(err.contains("matched 2 minErr call(s): 2 rewritten, 0 left inside throw"));
    assert!(err.contains("definition none found"));
    // MINERR_DISABLE_TIMING is set by the harness
    assert!(!err.contains("timing"));

    Ok(())
}

#[test]
fn test_extract_missing_input_is_internal_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.extract_command("missing.js"))?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to read input file"));

    Ok(())
}
