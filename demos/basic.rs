/* demos/basic.rs */

use std::sync::Arc;

use flagscope::{Context, FeatureSystem, FlagPatch, MemorySource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 1. A per-origin override store (a browser's localStorage, a dotfile, ...)
	let overrides = Arc::new(MemorySource::new());

	// 2. The feature system over a closed set of flags
	let system = FeatureSystem::builder(["darkMode", "betaSearch"])
		.shared_source(overrides.clone())
		.build()?;

	// 3. Enter a scope and hand its context down the tree
	let scope = system.enter_scope(&FlagPatch::new().set("darkMode", true))?;
	let ctx = Context::root().provide(&scope);

	let banner = system.gate("betaSearch")?;
	let _sub = banner.watch(&scope, |open| {
		println!("betaSearch gate is now {}", if open { "open" } else { "closed" });
	})?;

	println!("Initial flags: {:?}", system.read_flags(&ctx, &["darkMode", "betaSearch"])?);

	// 4. A developer forces betaSearch on locally; the next write picks it up
	overrides.insert("betaSearch", "TRUE");
	system
		.write_flags(&ctx)?
		.write(&FlagPatch::new().set("darkMode", false))?;

	println!("After write: {:?}", system.read_flags(&ctx, &["darkMode", "betaSearch"])?);
	if let Some(text) = banner.render(&ctx, || "Try the new search!")? {
		println!("Banner: {}", text);
	}

	Ok(())
}
