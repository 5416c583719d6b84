use std::collections::HashSet;
use std::path::Path;

fn main() {
    let taxonomy_path = Path::new("taxonomy/canonical_categories.json");
    validate_taxonomy_file(taxonomy_path);
    set_build_dependencies();
}

fn validate_taxonomy_file(taxonomy_path: &Path) {
    // Ensure taxonomy exists at build time
    assert!(
        taxonomy_path.exists(),
        "\n\nTAXONOMY BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the taxonomy file before building.\n",
        taxonomy_path.display()
    );

    let contents = std::fs::read_to_string(taxonomy_path).unwrap_or_else(|e| {
        panic!(
            "\n\nTAXONOMY BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            taxonomy_path.display()
        );
    });

    let taxonomy: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nTAXONOMY BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            taxonomy_path.display()
        );
    });

    validate_taxonomy_structure(&taxonomy);
}

fn validate_taxonomy_structure(taxonomy: &serde_json::Value) {
    assert!(
        taxonomy.is_object(),
        "\n\nTAXONOMY BUILD ERROR: Root must be a JSON object\n\
         Got: {taxonomy}\n"
    );

    let categories = taxonomy.get("categories").unwrap_or_else(|| {
        panic!(
            "\n\nTAXONOMY BUILD ERROR: Missing 'categories' field\n\
             The taxonomy must have a top-level 'categories' array.\n"
        );
    });

    let entries = categories.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nTAXONOMY BUILD ERROR: 'categories' must be an array\n\
             Got: {categories}\n"
        );
    });

    let total_aliases = validate_categories(entries);

    println!(
        "cargo:warning=Validated taxonomy: {} categories, {total_aliases} aliases",
        entries.len()
    );
}

fn validate_categories(entries: &[serde_json::Value]) -> usize {
    let mut seen = HashSet::new();
    let mut total_aliases = 0;

    for (i, category) in entries.iter().enumerate() {
        let id = category
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| {
                panic!("\n\nTAXONOMY BUILD ERROR: Category at index {i} missing string 'id' field\n")
            });

        assert!(
            !(id == "unknown" || id.starts_with("unknown:")),
            "\n\nTAXONOMY BUILD ERROR: Category id '{id}' (index {i}) is reserved for unmapped headings\n"
        );
        assert!(
            seen.insert(id),
            "\n\nTAXONOMY BUILD ERROR: Duplicate category id '{id}' (index {i})\n"
        );

        let name = category.get("name").and_then(|v| v.as_str()).unwrap_or("");
        assert!(
            !name.trim().is_empty(),
            "\n\nTAXONOMY BUILD ERROR: Category '{id}' (index {i}) missing or empty 'name' field\n"
        );

        if let Some(aliases) = category.get("aliases") {
            let aliases = aliases.as_array().unwrap_or_else(|| {
                panic!("\n\nTAXONOMY BUILD ERROR: Category '{id}' 'aliases' must be an array\n")
            });
            total_aliases += aliases.len();
        }
    }

    total_aliases
}

fn set_build_dependencies() {
    // Tell cargo to rerun if taxonomy changes
    println!("cargo:rerun-if-changed=taxonomy/canonical_categories.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
