use textblocks::{Block, Config, visible_text};

const SAMPLE: &str = "## Your lab results\\n\\nMost values are **within range**.\\n\\n\
Key findings:\\n- Vitamin D: *low*\\n- HbA1c: 5.4%\\n\\n\
Important\\nDiscuss supplements with your doctor, see https://example.org/vitamin-d.\\n\\n---\\n\
Disclaimer\\nThis summary is not medical advice.";

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let text = if args.len() > 1 {
        std::fs::read_to_string(&args[1]).expect("Failed to read file")
    } else {
        SAMPLE.to_string()
    };

    let blocks = textblocks::parse(&text);
    for block in &blocks {
        print_block(block, 0);
    }

    println!();
    let config = Config::load(std::path::Path::new("textblocks.toml")).unwrap_or_default();
    println!("{}", textblocks::blocks_to_typst(&blocks, &config));
}

fn print_block(block: &Block, depth: usize) {
    let indent = "  ".repeat(depth);
    match block {
        Block::Heading { level, content } => {
            println!("{indent}H{level} {}", visible_text(content));
        }
        Block::Rule => println!("{indent}---"),
        Block::BulletList { items } | Block::NumberedList { items } => {
            let marker = if matches!(block, Block::NumberedList { .. }) { "#" } else { "-" };
            for item in items {
                println!("{indent}{marker} {}", visible_text(item));
            }
        }
        Block::Paragraph { content, is_label } => {
            let tag = if *is_label { "label" } else { "p" };
            println!("{indent}[{tag}] {}", visible_text(content));
        }
        Block::Callout { kind, title, body } => {
            println!("{indent}<{}> {title}", kind.as_str());
            for inner in body {
                print_block(inner, depth + 1);
            }
        }
    }
}
