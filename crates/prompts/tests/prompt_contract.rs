//! Integration tests for the prompt builders.
//!
//! These check the properties the orchestrator relies on across all four
//! domains, rather than the wording of any single prompt.

use domain::{Domain, DomainPreferences, PastLikings, StressContext};
use prompts::prompt_for;

fn likings_with(domain: Domain, favorites: Vec<&str>) -> PastLikings {
    let list = Some(favorites.into_iter().map(String::from).collect());
    let mut likings = PastLikings::default();
    match domain {
        Domain::Movies => likings.favorite_movies = list,
        Domain::Books => likings.favorite_books = list,
        Domain::Music => likings.favorite_songs = list,
        Domain::Exercises => likings.favorite_exercises = list,
    }
    likings
}

#[test]
fn test_empty_and_absent_preferences_build_identical_prompts() {
    let stress = StressContext::new(55.0).unwrap();

    for domain in Domain::ALL {
        let absent = prompt_for(domain, &stress, &DomainPreferences::absent(domain));

        let empty_likings = likings_with(domain, vec![]);
        let empty = prompt_for(
            domain,
            &stress,
            &DomainPreferences::extract(Some(&empty_likings), domain),
        );

        let unrelated = PastLikings::default();
        let missing = prompt_for(
            domain,
            &stress,
            &DomainPreferences::extract(Some(&unrelated), domain),
        );

        assert_eq!(absent, empty, "{} prompt differs for empty list", domain);
        assert_eq!(absent, missing, "{} prompt differs for missing list", domain);
    }
}

#[test]
fn test_personalized_prompts_name_every_favorite() {
    let stress = StressContext::new(12.0).unwrap();

    for domain in Domain::ALL {
        let likings = likings_with(domain, vec!["First Pick", "Second Pick"]);
        let prefs = DomainPreferences::extract(Some(&likings), domain);
        let prompt = prompt_for(domain, &stress, &prefs);

        assert!(prompt.contains("First Pick"), "{} prompt misses favourite", domain);
        assert!(prompt.contains("Second Pick"), "{} prompt misses favourite", domain);
    }
}

#[test]
fn test_other_domains_favorites_do_not_leak() {
    let stress = StressContext::new(70.0).unwrap();
    let likings = likings_with(Domain::Books, vec!["Dune"]);

    for domain in [Domain::Movies, Domain::Music, Domain::Exercises] {
        let prompt = prompt_for(domain, &stress, &DomainPreferences::extract(Some(&likings), domain));
        assert!(!prompt.contains("Dune"), "{} prompt leaked a book favourite", domain);
    }
}

#[test]
fn test_prompts_are_deterministic() {
    let stress = StressContext::new(40.0).unwrap();
    let likings = likings_with(Domain::Music, vec!["Clair de Lune"]);
    let prefs = DomainPreferences::extract(Some(&likings), Domain::Music);

    assert_eq!(
        prompt_for(Domain::Music, &stress, &prefs),
        prompt_for(Domain::Music, &stress, &prefs)
    );
}

#[test]
fn test_prompt_json_example_parses() {
    // The example shape embedded in each prompt must itself be valid JSON
    let stress = StressContext::new(33.0).unwrap();
    for domain in Domain::ALL {
        let prompt = prompt_for(domain, &stress, &DomainPreferences::absent(domain));
        let start = prompt.rfind("\n{").expect("prompt should end with a JSON example") + 1;
        let example: serde_json::Value = serde_json::from_str(&prompt[start..]).unwrap();
        assert!(example.get(domain.items_key()).is_some());
    }
}
