use crate::{
    error::{ParseError, Warning},
    recognize,
};

/// A named `runtimeclass` block and the member names declared in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeClass {
    /// The class identifier from the opening line.
    pub name: String,

    /// Declared member names. In first-seen order while the block is open;
    /// sorted ordinal-ascending once the block is sealed.
    pub members: Vec<String>,

    /// 1-based line number of the opening line.
    pub opened_at: usize,
}

impl RuntimeClass {
    fn new(name: &str, opened_at: usize) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
            opened_at,
        }
    }

    fn seal(&mut self) {
        self.members.sort_unstable();
    }
}

/// Result of scanning one interface definition input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutput {
    /// Classes in the order their opening lines appeared.
    pub classes: Vec<RuntimeClass>,

    /// Non-fatal conditions noticed during the scan. The caller decides how
    /// to report them; this crate does no logging.
    pub warnings: Vec<Warning>,
}

enum State {
    Outside,
    Inside(RuntimeClass),
}

/// Scans interface definition text for `runtimeclass` blocks.
///
/// A single forward pass over the lines with two states. Lines that match
/// neither the open rule, the close rule, nor the member rule are skipped.
/// Opening a `runtimeclass` while another is still open is the only hard
/// error; an unterminated block at end of input is sealed and reported as a
/// [`Warning`].
pub fn parse(text: &str) -> Result<ParseOutput, ParseError> {
    let mut classes = Vec::new();
    let mut warnings = Vec::new();
    let mut state = State::Outside;

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;

        state = match state {
            State::Outside => match recognize::class_open(line) {
                Some(name) => State::Inside(RuntimeClass::new(name, lineno)),
                None => State::Outside,
            },
            State::Inside(mut class) => {
                if recognize::class_close(line) {
                    class.seal();
                    classes.push(class);
                    State::Outside
                } else if let Some(nested) = recognize::class_open(line) {
                    return Err(ParseError::nested_class(lineno, line, nested, &class.name));
                } else {
                    if let Some(member) = recognize::member_decl(line) {
                        class.members.push(member.to_string());
                    }
                    State::Inside(class)
                }
            }
        };
    }

    if let State::Inside(mut class) = state {
        warnings.push(Warning::UnterminatedClass {
            class: class.name.clone(),
            line: class.opened_at,
        });
        class.seal();
        classes.push(class);
    }

    Ok(ParseOutput { classes, warnings })
}

#[cfg(test)]
mod tests {
    use crate::{Warning, parse};

    #[test]
    fn single_class() {
        let data = "\
runtimeclass IMan
{
    void Open(String path);
    void Close();
}
";

        let output = parse(data).expect("could not parse input");
        assert_eq!(output.classes.len(), 1);
        assert!(output.warnings.is_empty());

        let class = &output.classes[0];
        assert_eq!(class.name, "IMan");
        assert_eq!(class.members, ["Close", "Open"]);
    }

    #[test]
    fn members_sorted_ordinal() {
        let data = "\
runtimeclass Sorting
{
    void beta();
    void Alpha();
    void Zulu();
}
";

        let output = parse(data).expect("could not parse input");
        // Uppercase sorts before lowercase in ordinal order.
        assert_eq!(output.classes[0].members, ["Alpha", "Zulu", "beta"]);
    }

    #[test]
    fn lines_outside_class_ignored() {
        let data = "\
import \"Inner.idl\";

namespace ImgUtilsX
{
runtimeclass IMan
{
    void Open(String path);
}
}
";

        let output = parse(data).expect("could not parse input");
        assert_eq!(output.classes.len(), 1);
        assert_eq!(output.classes[0].members, ["Open"]);
    }

    #[test]
    fn multiple_classes() {
        let data = "\
runtimeclass First
{
    void A();
}
unsealed runtimeclass Second
{
    void B();
}
";

        let output = parse(data).expect("could not parse input");
        let names: Vec<&str> = output.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn unterminated_class_sealed() {
        let data = "\
runtimeclass Dangling
{
    void Zeta();
    void Alpha();
";

        let output = parse(data).expect("could not parse input");
        assert_eq!(output.classes.len(), 1);
        assert_eq!(output.classes[0].members, ["Alpha", "Zeta"]);
        assert_eq!(
            output.warnings,
            [Warning::UnterminatedClass {
                class: "Dangling".to_string(),
                line: 1
            }]
        );
    }

    #[test]
    fn nested_class_is_an_error() {
        let data = "\
runtimeclass Outer
{
    runtimeclass Inner
";

        let err = parse(data).expect_err("nested runtimeclass must not parse");
        assert_eq!(err.line_number(), 3);
        assert!(err.to_string().contains("Inner"));
        assert!(err.to_string().contains("Outer"));
    }

    #[test]
    fn non_member_lines_skipped() {
        let data = "\
runtimeclass Mixed
{
    // not a declaration
    String Title;
    void Keep();
    [default_interface]
}
";

        let output = parse(data).expect("could not parse input");
        assert_eq!(output.classes[0].members, ["Keep"]);
    }
}
