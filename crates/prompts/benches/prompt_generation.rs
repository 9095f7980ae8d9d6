//! Benchmarks for prompt generation
//!
//! Run with: cargo bench --package prompts

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use domain::{Domain, DomainPreferences, PastLikings, StressContext};
use prompts::prompt_for;

fn bench_prompts_without_preferences(c: &mut Criterion) {
    let stress = StressContext::new(72.0).expect("valid percentage");

    c.bench_function("prompt_for_all_domains_absent", |b| {
        b.iter(|| {
            for domain in Domain::ALL {
                let prompt = prompt_for(domain, black_box(&stress), &DomainPreferences::absent(domain));
                black_box(prompt);
            }
        })
    });
}

fn bench_prompts_with_preferences(c: &mut Criterion) {
    let stress = StressContext::new(18.0).expect("valid percentage");
    let favorites: Vec<String> = (0..25).map(|i| format!("Favourite #{}", i)).collect();
    let likings = PastLikings {
        favorite_movies: Some(favorites.clone()),
        favorite_books: Some(favorites.clone()),
        favorite_songs: Some(favorites.clone()),
        favorite_exercises: Some(favorites),
    };

    c.bench_function("prompt_for_all_domains_personalized", |b| {
        b.iter(|| {
            for domain in Domain::ALL {
                let prefs = DomainPreferences::extract(Some(black_box(&likings)), domain);
                black_box(prompt_for(domain, &stress, &prefs));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_prompts_without_preferences,
    bench_prompts_with_preferences
);
criterion_main!(benches);
