use vembed::{ProviderKind, ResolutionStrategy};

pub fn cmd_providers() {
    println!("📺 Supported providers:\n");

    for provider in ProviderKind::ALL {
        let strategy = match provider.strategy() {
            ResolutionStrategy::Eager => "eager",
            ResolutionStrategy::LazyOnAccess => "lazy",
        };
        println!("{:<12} {}", provider.as_str(), provider.display_name());
        println!("   oEmbed: {}", provider.oembed_endpoint());
        println!("   Metadata: {strategy}");
    }
}
