use {
    crate::schema::DeckFile,
    std::{fs, path::Path},
};

pub(crate) fn assert_approx_eq_slice(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len());
    for (i, e) in a.iter().enumerate() {
        approx::assert_relative_eq!(*e, b[i], max_relative = 1.0E-12);
    }
}

/// Compares two deck directories file by file and token by token, numeric
/// tokens within a relative tolerance.
pub(crate) fn assert_approx_eq_decks<A: AsRef<Path>, B: AsRef<Path>>(correct: A, test: B) {
    for file in DeckFile::ALL.iter() {
        let correct_path = correct.as_ref().join(file.file_name());
        let test_path = test.as_ref().join(file.file_name());
        assert_eq!(correct_path.exists(), test_path.exists(), "{}", file);
        if !correct_path.exists() {
            continue;
        }

        let correct_text = fs::read_to_string(correct_path).unwrap();
        let test_text = fs::read_to_string(test_path).unwrap();
        let correct_lines = correct_text.lines().collect::<Vec<_>>();
        let test_lines = test_text.lines().collect::<Vec<_>>();
        assert_eq!(correct_lines.len(), test_lines.len(), "{}", file);

        for (n, (a, b)) in correct_lines.iter().zip(&test_lines).enumerate() {
            let a = a.split_whitespace().collect::<Vec<_>>();
            let b = b.split_whitespace().collect::<Vec<_>>();
            assert_eq!(a.len(), b.len(), "{}:{}", file, n + 1);
            for (x, y) in a.iter().zip(&b) {
                match (x.parse::<f64>(), y.parse::<f64>()) {
                    (Ok(x), Ok(y)) => {
                        approx::assert_relative_eq!(x, y, max_relative = 1.0E-12)
                    }
                    _ => assert_eq!(x, y, "{}:{}", file, n + 1),
                }
            }
        }
    }
}
