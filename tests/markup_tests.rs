use locator_catalog::markup::{
    naming::{CollisionPolicy, NameRegistry, to_identifier},
    scan::{
        element_at, element_text, element_type_at, inner_text, is_css_identifier, is_dynamic,
        open_tags, ordinal_among, parse_open_tag, text_run_at,
    },
};

// ============================================================================
// to_identifier
// ============================================================================

#[test]
fn identifier_pascal_cases_words() {
    assert_eq!(to_identifier("go-btn"), "GoBtn");
    assert_eq!(to_identifier("Sign in"), "SignIn");
    assert_eq!(to_identifier("user_name"), "UserName");
    assert_eq!(to_identifier("  save   changes! "), "SaveChanges");
}

#[test]
fn identifier_keeps_inner_capitals() {
    assert_eq!(to_identifier("firstName"), "FirstName");
    assert_eq!(to_identifier("API key"), "APIKey");
}

#[test]
fn identifier_prefixes_leading_digit() {
    assert_eq!(to_identifier("2fa code"), "_2faCode");
    assert_eq!(to_identifier("404"), "_404");
}

#[test]
fn identifier_of_punctuation_is_empty() {
    assert_eq!(to_identifier(""), "");
    assert_eq!(to_identifier("--- !!"), "");
}

// ============================================================================
// NameRegistry collision policies
// ============================================================================

#[test]
fn registry_skip_drops_duplicates() {
    let mut registry = NameRegistry::new();
    assert_eq!(registry.claim("Save", CollisionPolicy::Skip, 1), Some("Save".into()));
    assert_eq!(registry.claim("Save", CollisionPolicy::Skip, 2), None);
    assert_eq!(registry.len(), 1);
}

#[test]
fn registry_numeric_suffix_counts_up() {
    let mut registry = NameRegistry::new();
    assert_eq!(registry.claim("Email", CollisionPolicy::NumericSuffix, 1), Some("Email".into()));
    assert_eq!(registry.claim("Email", CollisionPolicy::NumericSuffix, 2), Some("Email2".into()));
    assert_eq!(registry.claim("Email", CollisionPolicy::NumericSuffix, 3), Some("Email3".into()));
    assert!(registry.contains("Email2"));
}

#[test]
fn registry_ordinal_appends_running_count() {
    let mut registry = NameRegistry::new();
    assert_eq!(registry.claim("Table", CollisionPolicy::Ordinal, 0), Some("Table".into()));
    assert_eq!(registry.claim("Table", CollisionPolicy::Ordinal, 1), Some("Table1".into()));
    // Ordinal variant already taken → dropped, no further probing
    assert_eq!(registry.claim("Table", CollisionPolicy::Ordinal, 1), None);
}

#[test]
fn registry_rejects_empty_base() {
    let mut registry = NameRegistry::new();
    assert_eq!(registry.claim("", CollisionPolicy::NumericSuffix, 1), None);
    assert!(registry.is_empty());
}

#[test]
fn registry_tracks_claimed_elements_separately() {
    let mut registry = NameRegistry::new();
    assert!(!registry.is_element_claimed(12));
    registry.claim_element(12);
    assert!(registry.is_element_claimed(12));
    assert!(registry.is_empty(), "element claims are not names");
}

// ============================================================================
// Markup scanning
// ============================================================================

#[test]
fn parse_open_tag_reads_attributes() {
    let markup = r#"<input type="text" formControlName='email' required (keyup)="go($event)">"#;
    let tag = parse_open_tag(markup, 0).unwrap();

    assert_eq!(tag.name, "input");
    assert_eq!(tag.attr("type"), Some("text"));
    assert_eq!(tag.attr("formcontrolname"), Some("email"), "case-insensitive");
    assert_eq!(tag.attr("required"), Some(""));
    assert_eq!(tag.attr("(keyup)"), Some("go($event)"));
    assert_eq!(tag.end, markup.len() - 1);
}

#[test]
fn open_tag_end_skips_quoted_angle_brackets() {
    let markup = r#"<button [disabled]="a > b">Go</button>"#;
    let tag = parse_open_tag(markup, 0).unwrap();
    assert_eq!(&markup[tag.end..tag.end + 3], ">Go");
}

#[test]
fn static_attr_ignores_interpolation_and_bindings() {
    let markup = r#"<input placeholder="{{ hint }}" [title]="t" name="q">"#;
    let tag = parse_open_tag(markup, 0).unwrap();

    assert_eq!(tag.static_attr("placeholder"), None);
    assert_eq!(tag.static_attr("title"), None, "[title] is a binding, not title");
    assert_eq!(tag.static_attr("name"), Some("q"));
}

#[test]
fn element_at_finds_enclosing_open_tag() {
    let markup = r#"<div><span class="x" data-testid="label">Hi</span></div>"#;
    let pos = markup.find("data-testid").unwrap();

    let tag = element_at(markup, pos).unwrap();
    assert_eq!(tag.name, "span");
    assert_eq!(element_type_at(markup, pos), "span");
}

#[test]
fn element_at_outside_any_element_is_unknown() {
    let markup = "<p>one</p> stray text";
    let pos = markup.find("stray").unwrap();

    assert!(element_at(markup, pos).is_none());
    assert_eq!(element_type_at(markup, pos), "unknown");
}

#[test]
fn element_at_skips_closed_children() {
    let markup = "<section><p><strong>Hi</strong> <em>there</em> {{ name }}</p></section>";
    let pos = markup.find("{{").unwrap();

    assert_eq!(element_type_at(markup, pos), "p");
}

#[test]
fn element_at_skips_void_and_self_closing_tags() {
    let markup = r#"<p><br/>{{ a }}</p><div><input name="q"><img src="x.png" /> {{ b }}</div>"#;

    assert_eq!(element_type_at(markup, markup.find("{{ a").unwrap()), "p");
    assert_eq!(element_type_at(markup, markup.find("{{ b").unwrap()), "div");
}

#[test]
fn element_at_pairs_nested_same_name_tags() {
    let markup = "<div class=\"outer\"><div>inner</div><div><span>x</span></div> tail</div>";
    let tag = element_at(markup, markup.find("tail").unwrap()).unwrap();

    assert_eq!(tag.start, 0);
    assert_eq!(tag.attr("class"), Some("outer"));
}

#[test]
fn text_run_is_bounded_by_neighbouring_tags() {
    let markup = "<p><strong>Hi</strong>  Hello {{ name }} <em>!</em></p>";
    let pos = markup.find("{{").unwrap();

    assert_eq!(text_run_at(markup, pos), Some("Hello {{ name }}".into()));
}

#[test]
fn css_identifier_rejects_utility_class_syntax() {
    assert!(is_css_identifier("card"));
    assert!(is_css_identifier("-webkit-box"));
    assert!(is_css_identifier("_private"));
    assert!(is_css_identifier("btn-primary_2"));
    assert!(!is_css_identifier("md:w-1/2"));
    assert!(!is_css_identifier("text-[12px]"));
    assert!(!is_css_identifier("2col"));
    assert!(!is_css_identifier("w-1.5"));
    assert!(!is_css_identifier(""));
}

#[test]
fn inner_text_drops_icons_and_nested_tags() {
    let markup = "<button><mat-icon>save</mat-icon> <b>Save</b> draft</button>";
    let tag = parse_open_tag(markup, 0).unwrap();
    assert_eq!(inner_text(markup, &tag), Some("Save draft".into()));
}

#[test]
fn element_text_is_none_for_void_elements() {
    let markup = r#"<input value="x"> trailing"#;
    let tag = parse_open_tag(markup, 0).unwrap();
    assert_eq!(element_text(markup, &tag), None);

    let markup = "<a>\n   Home\n</a>";
    let tag = parse_open_tag(markup, 0).unwrap();
    assert_eq!(element_text(markup, &tag), Some("Home".into()));
}

#[test]
fn ordinal_among_counts_matching_tags() {
    let markup = "<table></table><div></div><table></table>";
    let tags = open_tags(markup);
    let second = tags.iter().filter(|t| t.name == "table").nth(1).unwrap();

    assert_eq!(ordinal_among(markup, second, |t| t.name == "table"), (1, 2));
}

#[test]
fn interpolation_marks_dynamic_text() {
    assert!(is_dynamic("Hello {{ name }}"));
    assert!(!is_dynamic("Hello"));
}
