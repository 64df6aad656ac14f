//! Example: Signup Popup Verification
//!
//! Demonstrates: a scenario run against the built-in signup deck using
//! the scripted mock driver, with one planted mismatch so the
//! aggregated report has something to say.
//!
//! Run with: `cargo run --example signup_mock`

use cotejar::{
    catalog, run_scenario, CotejarResult, FieldProbe, Locale, MockDriver, MockElement,
    PollOptions, PopupSpec, RunOptions, Scenario, Selector,
};

fn main() -> CotejarResult<()> {
    println!("=== Signup Popup Verification (mock) ===\n");

    // 1. Render the French signup popup; the submit button is left in
    //    English on purpose.
    println!("1. Rendering the mock page...");
    let deck = catalog::signup();
    let driver = MockDriver::new()
        .with_element(
            "div.popup[data-popup-name='signup']",
            MockElement::new().with_tag("div"),
        )
        .with_element(
            ".title",
            MockElement::new().with_visible_text(deck.get_or_empty("fr", "title")),
        )
        .with_element(
            "input[type=email]",
            MockElement::new()
                .with_tag("input")
                .with_attribute("placeholder", deck.get_or_empty("fr", "email_ph")),
        )
        .with_element(
            "button[type=submit]",
            MockElement::new()
                .with_tag("button")
                .with_visible_text("Sign Up"),
        );

    // 2. Describe the scenario: which popup, which fields, which deck.
    println!("2. Building the signup.fr scenario...");
    let popup = PopupSpec::new(
        "signup",
        vec![Selector::css("div.popup[data-popup-name='signup']")],
    );
    let scenario = Scenario::new("signup", Locale::Fr, popup)
        .with_field("title", FieldProbe::text(Selector::css(".title")))
        .with_field(
            "email_ph",
            FieldProbe::attribute(Selector::css("input[type=email]"), "placeholder"),
        )
        .with_field(
            "submit_text",
            FieldProbe::text(Selector::css("button[type=submit]")),
        );

    // 3. Run every check; nothing stops at the first mismatch.
    println!("3. Running the checks...\n");
    let options = RunOptions::uniform(PollOptions::from_millis(500, 25));
    let mut collector = run_scenario(&driver, deck, &scenario, options);
    println!(
        "   checks recorded: {}, failures: {}\n",
        collector.checks_recorded(),
        collector.failure_count()
    );

    // 4. One aggregated report for the whole scenario.
    println!("4. Aggregated report:\n");
    match collector.report() {
        Ok(()) => println!("   all strings match the deck"),
        Err(failure) => print!("{failure}"),
    }

    Ok(())
}
