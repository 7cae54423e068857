#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sophie_bot::random_text::{
        parse_random_text, parse_random_text_random, Chooser, FnChooser, RandomChooser,
    };

    fn first() -> FnChooser<impl FnMut(&[&str]) -> usize> {
        FnChooser::new(|_: &[&str]| 0)
    }

    fn last() -> FnChooser<impl FnMut(&[&str]) -> usize> {
        FnChooser::new(|options: &[&str]| options.len() - 1)
    }

    /// Records every option list it is offered and picks from a script
    struct ScriptedChooser {
        picks: Vec<usize>,
        seen: Vec<Vec<String>>,
    }

    impl Chooser for ScriptedChooser {
        fn choose<'a>(&mut self, options: &[&'a str]) -> &'a str {
            self.seen
                .push(options.iter().map(|o| o.to_string()).collect());
            let index = self.picks.remove(0);
            options[index]
        }
    }

    #[test]
    fn test_fixed_chooser_is_deterministic() {
        let text = "Hello %%%world%%%universe%%% today!";
        assert_eq!(parse_random_text(text, &mut first()), "Hello world today!");
        assert_eq!(parse_random_text(text, &mut last()), "Hello universe today!");
    }

    #[test]
    fn test_no_delimiter_passthrough() {
        assert_eq!(parse_random_text("plain text", &mut first()), "plain text");
        assert_eq!(parse_random_text_random("plain text"), "plain text");
        assert_eq!(parse_random_text("", &mut first()), "");
    }

    #[test]
    fn test_independent_sections() {
        let mut chooser = ScriptedChooser {
            picks: vec![1, 1],
            seen: Vec::new(),
        };
        let result = parse_random_text("A %%%x%%%y%%%  %%%B%%%C%%%", &mut chooser);
        assert_eq!(result, "A y  C");
        assert_eq!(
            chooser.seen,
            vec![
                vec!["x".to_string(), "y".to_string()],
                vec!["B".to_string(), "C".to_string()],
            ]
        );
    }

    #[test]
    fn test_newline_between_sections() {
        let result = parse_random_text("%%%a%%%b%%%\n%%%c%%%d%%%", &mut first());
        assert_eq!(result, "a\nc");
    }

    #[test]
    fn test_unclosed_section_takes_the_rest() {
        assert_eq!(parse_random_text("Hi %%%there", &mut first()), "Hi there");
        // the third marker closes the section, "c" is literal
        assert_eq!(parse_random_text("%%%a%%%b%%%c", &mut last()), "bc");
    }

    #[test]
    fn test_multiline_options_are_normalized() {
        let text = "Intro\n%%%\nA\n%%%\nB\n%%%\nOutro";
        assert_eq!(parse_random_text(text, &mut first()), "Intro\nA\nOutro");
        assert_eq!(parse_random_text(text, &mut last()), "Intro\nB\nOutro");
    }

    #[test]
    fn test_empty_option_can_be_chosen() {
        let text = "x%%%%%%y%%%z";
        assert_eq!(parse_random_text(text, &mut first()), "xz");
        assert_eq!(parse_random_text(text, &mut last()), "xyz");
    }

    #[test]
    fn test_seeded_random_chooser_is_reproducible() {
        let text = "Pick: %%%a%%%b%%%c%%%d%%%!";
        let one = parse_random_text(text, &mut RandomChooser::with_rng(StdRng::seed_from_u64(7)));
        let two = parse_random_text(text, &mut RandomChooser::with_rng(StdRng::seed_from_u64(7)));
        assert_eq!(one, two);
        assert!(["Pick: a!", "Pick: b!", "Pick: c!", "Pick: d!"].contains(&one.as_str()));
    }

    #[test]
    fn test_literal_text_between_sections_joins_them() {
        // only blank gaps split sections; other text becomes another option
        let mut chooser = ScriptedChooser {
            picks: vec![2],
            seen: Vec::new(),
        };
        let result = parse_random_text("%%%a%%%b%%% and %%%c%%%", &mut chooser);
        assert_eq!(result, " and ");
        assert_eq!(chooser.seen, vec![vec!["a", "b", " and ", "c"]]);
    }

    #[test]
    fn test_random_chooser_covers_all_options() {
        let mut chooser = RandomChooser::with_rng(StdRng::seed_from_u64(42));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(parse_random_text("%%%a%%%b%%%c%%%", &mut chooser));
        }
        assert_eq!(seen.len(), 3);
    }
}
