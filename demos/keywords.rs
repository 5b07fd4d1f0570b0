use avl_vocab::{Order, TokenClass, Vocabulary};

const KEYWORDS: &str = "\
abstract
boolean
class
for
if
int
public
return
static
void
while
";

fn main() -> Result<(), avl_vocab::VocabularyError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let vocabulary = Vocabulary::load(KEYWORDS.as_bytes())?;
    println!("{} reserved words", vocabulary.len());
    println!("Inorder:   {}", vocabulary.render(Order::Inorder));

    for token in ["public", "count", "2nd", "42", "while", "$total"] {
        let class = vocabulary.classify(token);
        let note = match class {
            TokenClass::Reserved => "reserved",
            TokenClass::Identifier => "identifier",
            TokenClass::Number => "number",
            TokenClass::Invalid => "invalid identifier",
        };
        println!("{token:>8} => {note}");
    }

    let source = "public class Demo {\n    int 2nd = total; // while\n    /* static */ return \"void\";\n}\n";
    let report = vocabulary.scan(source.as_bytes())?;
    println!("Valid identifiers: {:?}", report.valid);
    println!("Invalid identifiers: {:?}", report.invalid);
    Ok(())
}
