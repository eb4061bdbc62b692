// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! End-to-end compilation tests.
//!
//! Every expected module uses the fixed key token `xxxx-xxxx`.

use superviews::{compile, text_literal, CompileOptions, SuperviewsError};

fn transpile(source: &str) -> String {
    let options = CompileOptions::new().with_fixed_key_token("xxxx-xxxx");
    compile(source, &options).unwrap()
}

fn add_wrapper(content: &str) -> String {
    format!(";(function () {{\n{}\n}})()\n", content)
}

/// Undoes [`text_literal`]: drops the quotes, resolves line continuations,
/// then the backslash escapes.
fn resolve_text_literal(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let joined = inner.replace(" \\\n", "\n");
    let mut out = String::new();
    let mut chars = joined.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Body lines between `return function ... {` and the closing brace.
fn body_of(output: &str) -> String {
    let start = output.find("(data) {\n").unwrap() + "(data) {\n".len();
    let end = output.rfind("\n}\n})()").unwrap();
    output[start..end].to_string()
}

mod static_content {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_element() {
        let expected = "var __target

return function description (data) {
elementOpen(\"div\")
elementClose(\"div\")
}";
        assert_eq!(transpile("<div></div>"), add_wrapper(expected));
    }

    #[test]
    fn simple_element_with_attributes() {
        let expected = "var __target
var hoisted1 = [\"class\", \"header\", \"id\", \"title\"]

return function description (data) {
elementOpen(\"h1\", \"xxxx-xxxx\", hoisted1)
elementClose(\"h1\")
}";
        assert_eq!(
            transpile("<h1 class=\"header\" id=\"title\"></h1>"),
            add_wrapper(expected)
        );
    }

    #[test]
    fn reuses_hoisted_variables_with_same_attributes() {
        let expected = "var __target
var hoisted1 = [\"class\", \"header\", \"id\", \"title\"]
var hoisted2 = [\"class\", \"header\"]
var hoisted3 = [\"class\", \"header\", \"id\", \"nav\"]

return function description (data) {
elementOpen(\"h1\", \"xxxx-xxxx\", hoisted1)
elementClose(\"h1\")
elementOpen(\"h1\", \"xxxx-xxxx\", hoisted1)
elementClose(\"h1\")
elementOpen(\"h1\", \"xxxx-xxxx\", hoisted2)
elementClose(\"h1\")
elementOpen(\"h1\", \"xxxx-xxxx\", hoisted3)
elementClose(\"h1\")
}";
        let source = "<h1 class=\"header\" id=\"title\"></h1>
<h1 id=\"title\" class=\"header\"></h1>
<h1 class=\"header\"></h1>
<h1 class=\"header\" id=\"nav\"></h1>
";
        assert_eq!(transpile(source), add_wrapper(expected));
    }

    #[test]
    fn void_element() {
        let expected = "var __target

return function description (data) {
elementOpen(\"br\")
elementClose(\"br\")
}";
        assert_eq!(transpile("<br/>"), add_wrapper(expected));
        assert_eq!(transpile("<br>"), add_wrapper(expected));
    }

    #[test]
    fn single_line_text() {
        let expected = "var __target

return function description (data) {
text(\"my text\")
}";
        assert_eq!(transpile("my text"), add_wrapper(expected));
    }

    #[test]
    fn multi_line_text() {
        let expected = "var __target

return function description (data) {
text(\"my very  \\
 long  \\
 text\")
}";
        assert_eq!(transpile("my very \n long \n text"), add_wrapper(expected));
    }
}

mod each_attribute {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn transpiles_correctly() {
        let expected = "var __target

return function description (data) {
__target = array
if (__target) {
  ;(__target.forEach ? __target : Object.keys(__target)).forEach(function($value, $item, $target) {
    var item = $value
    var $key = \"xxxx-xxxx_\" + $item
    elementOpen(\"li\", $key)
    elementClose(\"li\")
  }, this)
}
}";
        assert_eq!(
            transpile("<li each=\"item in array\"></li>"),
            add_wrapper(expected)
        );
    }

    #[test]
    fn handles_custom_key() {
        let expected = "var __target

return function description (data) {
__target = array
if (__target) {
  ;(__target.forEach ? __target : Object.keys(__target)).forEach(function($value, $item, $target) {
    var item = $value
    var $key = \"xxxx-xxxx_\" + item.id
    elementOpen(\"li\", $key)
    elementClose(\"li\")
  }, this)
}
}";
        assert_eq!(
            transpile("<li each=\"item, item.id in array\"></li>"),
            add_wrapper(expected)
        );
    }

    #[test]
    fn if_attribute_guards_inside_loop() {
        let output = transpile("<li each=\"item in array\" if=\"item.done\"></li>");
        assert!(output.contains(
            "    var $key = \"xxxx-xxxx_\" + $item
    if (item.done) {
      elementOpen(\"li\", $key)
      elementClose(\"li\")
    }
  }, this)"
        ));
    }
}

mod each_element {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn transpiles_correctly() {
        let expected = "var __target

return function description (data) {
__target = array
if (__target) {
  ;(__target.forEach ? __target : Object.keys(__target)).forEach(function($value, $item, $target) {
    var item = $value
    var $key = \"xxxx-xxxx_\" + $item
    elementOpen(\"li\", $key + \"_1\")
      elementOpen(\"div\")
      elementClose(\"div\")
    elementClose(\"li\")
    elementOpen(\"li\", $key + \"_2\")
    elementClose(\"li\")
  }, this)
}
}";
        let source = "<each expression=\"item in array\">
  <li><div></div></li>
  <li></li>
</each>";
        assert_eq!(transpile(source), add_wrapper(expected));
    }

    #[test]
    fn handles_custom_key() {
        let expected = "var __target

return function description (data) {
__target = array
if (__target) {
  ;(__target.forEach ? __target : Object.keys(__target)).forEach(function($value, $item, $target) {
    var item = $value
    var $key = \"xxxx-xxxx_\" + item.id
    elementOpen(\"li\", $key + \"_1\")
      elementOpen(\"div\")
      elementClose(\"div\")
    elementClose(\"li\")
    elementOpen(\"li\", $key + \"_2\")
    elementClose(\"li\")
  }, this)
}
}";
        let source = "<each expression=\"item, item.id in array\">
  <li><div></div></li>
  <li></li>
</each>";
        assert_eq!(transpile(source), add_wrapper(expected));
    }

    #[test]
    fn allows_nested_if_expression() {
        let expected = "var __target

return function description (data) {
__target = array
if (__target) {
  ;(__target.forEach ? __target : Object.keys(__target)).forEach(function($value, $item, $target) {
    var item = $value
    var $key = \"xxxx-xxxx_\" + $item
    if (test) {
      elementOpen(\"li\", $key + \"_1\")
        elementOpen(\"div\")
        elementClose(\"div\")
      elementClose(\"li\")
    }
    elementOpen(\"li\", $key + \"_2\")
    elementClose(\"li\")
  }, this)
}
}";
        let source = "<each expression=\"item in array\">
  <li if=\"test\"><div></div></li>
  <li></li>
</each>";
        assert_eq!(transpile(source), add_wrapper(expected));
    }

    #[test]
    fn condition_alias_compiles_identically() {
        let with_expression = transpile("<each expression=\"item in array\"><li></li></each>");
        let with_condition = transpile("<each condition=\"item in array\"><li></li></each>");
        assert_eq!(with_expression, with_condition);
    }

    #[test]
    fn attribute_form_matches_wrapper_form() {
        let attribute_form =
            transpile("<li each=\"item, item.id in data.items\" class=\"row\"><b></b></li>");
        let wrapper_form = transpile(concat!(
            "<each expression=\"item, item.id in data.items\">",
            "<li class=\"row\"><b></b></li>",
            "</each>",
        ));
        assert_eq!(attribute_form, wrapper_form);
    }

    #[test]
    fn custom_key_replaces_index() {
        let default_key = transpile("<li each=\"item in array\"></li>");
        let custom_key = transpile("<li each=\"item, item.id in array\"></li>");

        assert!(default_key.contains("var $key = \"xxxx-xxxx_\" + $item\n"));
        assert!(custom_key.contains("var $key = \"xxxx-xxxx_\" + item.id\n"));
        assert!(!custom_key.contains("+ $item\n"));
    }
}

mod script_element {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn outputs_the_raw_content() {
        let expected = "var __target

return function description (data) {
var test = getData()
}";
        assert_eq!(
            transpile("<script>var test = getData()</script>"),
            add_wrapper(expected)
        );
    }

    #[test]
    fn hoists_the_raw_content() {
        let expected = "var test = require(\"test\")
var __target

return function description (data) {

}";
        assert_eq!(
            transpile("<script hoisted>var test = require(\"test\")</script>"),
            add_wrapper(expected)
        );
    }
}

mod properties {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distinct_sets_numbered_in_first_seen_order() {
        let output = transpile(concat!(
            "<a href=\"/b\"></a><a href=\"/a\"></a>",
            "<a href=\"/b\"></a><a href=\"/c\" rel=\"x\"></a>",
        ));

        assert!(output.contains(concat!(
            "var hoisted1 = [\"href\", \"/b\"]\n",
            "var hoisted2 = [\"href\", \"/a\"]\n",
            "var hoisted3 = [\"href\", \"/c\", \"rel\", \"x\"]\n",
        )));
        assert_eq!(output.matches("var hoisted").count(), 3);
        assert_eq!(output.matches(", hoisted1)").count(), 2);
    }

    #[test]
    fn single_line_text_is_verbatim() {
        for content in ["hello world", "  padded  ", "a+b=c; d"] {
            let body = body_of(&transpile(content));
            assert_eq!(body, format!("text(\"{}\")", content));
        }
    }

    #[test]
    fn multi_line_text_is_reversible() {
        for content in [
            "my very \n long \n text",
            "line one\nline \"two\"\n\nline four",
            "trailing backslash \\\nnext",
            "windows\r\nbreaks",
        ] {
            let body = body_of(&transpile(content));
            let literal = body.strip_prefix("text(").unwrap().strip_suffix(')').unwrap();
            assert_eq!(literal, text_literal(content));
            assert_eq!(resolve_text_literal(literal), content);
        }
    }

    #[test]
    fn lenient_markup_compiles() {
        let expected = "var __target

return function description (data) {
elementOpen(\"p\")
  text(\"a < b\")
  elementOpen(\"br\")
  elementClose(\"br\")
elementClose(\"p\")
}";
        assert_eq!(transpile("<p>a < b<br></br></p>"), add_wrapper(expected));
    }

    #[test]
    fn elements_without_attributes_have_no_key() {
        let output = transpile("<section><p>Hi</p></section>");
        assert!(!output.contains("xxxx-xxxx"));
        assert!(!output.contains("var hoisted"));
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile_err(source: &str) -> SuperviewsError {
        compile(source, &CompileOptions::new()).unwrap_err()
    }

    #[test]
    fn unterminated_tag_is_parse_error() {
        assert!(matches!(compile_err("<div><span></div>"), SuperviewsError::ParseError { .. }));
        assert!(matches!(compile_err("<div class=\"a"), SuperviewsError::ParseError { .. }));
        assert!(matches!(compile_err("<script>var a"), SuperviewsError::ParseError { .. }));
    }

    #[test]
    fn self_closing_script_is_parse_error() {
        for source in ["<script hoisted/>", "<div><script /></div>"] {
            match compile_err(source) {
                SuperviewsError::ParseError { message, .. } => {
                    assert!(message.contains("</script>"), "{}", message)
                }
                other => panic!("Expected parse error for {:?}, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn malformed_directive_is_expression_error() {
        assert!(matches!(
            compile_err("<li each=\"in array\"></li>"),
            SuperviewsError::ExpressionSyntaxError { .. }
        ));
        assert!(matches!(
            compile_err("<li if=\"(a\"></li>"),
            SuperviewsError::ExpressionSyntaxError { .. }
        ));
    }

    #[test]
    fn error_position_points_at_line() {
        let err = compile_err("<ul>\n  <li each=\"item of items\"></li>\n</ul>");
        assert_eq!(err.position(), Some((2, 7)));
    }
}
