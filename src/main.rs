use qiki_number::{Number, Qigits, SuffixType};

fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(text: &str) {
    match text.parse::<Number>() {
        Ok(value) => {
            println!("  {text} ->");
            println!("    q-string: {value}");
            println!("    Bytes:    {}", format_hex(value.as_bytes()));
            println!("    Zone:     {}", value.zone());
            match value.to_f64() {
                Ok(x) => println!("    As float: {x}"),
                Err(e) => println!("    As float: {e}"),
            }
            println!();
        }
        Err(e) => println!("  Error parsing {text}: {e}\n"),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        for arg in &args {
            describe(arg);
        }
        return;
    }

    println!("=== qiki Number Encoding Demo ===\n");

    let examples = [
        "0", "1", "-1", "256", "-256", "0.5", "-0.5", "3.141592653589793", "1e100", "inf",
        "-inf", "nan", "0q82", "0q7E01",
    ];
    for example in &examples {
        describe(example);
    }

    println!("=== Precision ===\n");
    for qigits in [1, 2, 3, 8] {
        match Number::from_f64(1.1, Qigits::new(qigits)) {
            Ok(value) => println!("  1.1 at {qigits} qigits: {value}"),
            Err(e) => println!("  1.1 at {qigits} qigits: {e}"),
        }
    }
    println!();

    println!("=== Order Preservation ===\n");
    let mut values: Vec<Number> = ["100", "-0.001", "0", "-1e20", "1e-20", "7", "-inf", "nan"]
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    values.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
    for value in &values {
        let x = value.to_f64().unwrap_or(f64::NAN);
        println!("  {:<28} {x}", value.to_string());
    }
    println!();

    println!("=== Suffixes ===\n");
    let listing = Number::from(1234)
        .plus_suffix(SuffixType::LISTING, &Number::from(5));
    match listing {
        Ok(key) => {
            println!("  listing key:  {key}");
            if let Ok(root) = key.unsuffixed() {
                println!("  root:         {root}");
            }
        }
        Err(e) => println!("  listing key:  {e}"),
    }
    match Number::from_complex(1.5, -2.0) {
        Ok(z) => {
            println!("  1.5 - 2i:     {z}");
            println!("  conjugate:    {}", z.conjugate().map_or_else(|e| e.to_string(), |c| c.to_string()));
        }
        Err(e) => println!("  1.5 - 2i:     {e}"),
    }
}
