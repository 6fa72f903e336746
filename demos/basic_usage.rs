//! Basic Variant usage example

use halo_variant::{alternatives, apply, Variant, Visit, Visitor};

type Setting = Variant<alternatives![i64, f64, String, bool]>;

/// Renders a setting the way a config file would spell it.
struct Render;

impl Visitor for Render {
    type Output = String;
}

impl Visit<i64> for Render {
    fn visit(&mut self, value: &i64) -> String {
        value.to_string()
    }
}

impl Visit<f64> for Render {
    fn visit(&mut self, value: &f64) -> String {
        format!("{value:.2}")
    }
}

impl Visit<String> for Render {
    fn visit(&mut self, value: &String) -> String {
        format!("{value:?}")
    }
}

impl Visit<bool> for Render {
    fn visit(&mut self, value: &bool) -> String {
        if *value { "yes" } else { "no" }.to_string()
    }
}

fn main() -> anyhow::Result<()> {
    println!("Variant Basic Usage Example");
    println!("===========================");

    let mut setting = Setting::new(42i64);
    println!("Initial value:");
    println!("  which = {} ({})", setting.which(), setting.active_type_name());
    println!("  rendered = {}", apply(Render, &setting));
    println!("  as i64 = {}", setting.get::<i64, _>()?);

    // Type-checked extraction fails recoverably
    if let Err(err) = setting.get::<String, _>() {
        println!("  as String -> {err}");
    }

    // Reassignment switches the live alternative
    setting.set(String::from("halo"));
    println!("After assigning text:");
    println!("  which = {} ({})", setting.which(), setting.active_type_name());
    println!("  rendered = {}", apply(Render, &setting));

    // In-place edits through get_mut
    setting.get_mut::<String, _>()?.push_str("-variant");
    println!("  edited = {}", setting.get::<String, _>()?);

    // Moving the value back out
    let text = setting.into_inner::<String, _>().map_err(|_| anyhow::anyhow!("not text"))?;
    println!("Moved out: {text}");

    let settings = [
        Setting::new(3.5f64),
        Setting::new(false),
        Setting::new(-7i64),
    ];
    println!("\nRendered list:");
    for s in &settings {
        println!("  [{}] {} = {}", s.which(), s.active_type_name(), apply(Render, s));
    }

    Ok(())
}
