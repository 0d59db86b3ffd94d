use std::cmp::Ordering;

/// Compares two identifiers in natural order.
///
/// Characters are compared one by one, except that runs of ASCII digits present at the
/// same position in both strings are compared by their numeric value, so `"SOL2"` sorts
/// before `"SOL12"`. Digit runs of arbitrary length are supported (no integer parsing).
///
/// Runs that are numerically equal but spelled differently (`"A01"` and `"A1"`) are
/// tie-broken by plain byte order, which keeps the ordering total and deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (lhs, rhs) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);

    while i < lhs.len() && j < rhs.len() {
        let (cl, cr) = (lhs[i], rhs[j]);
        if cl.is_ascii_digit() && cr.is_ascii_digit() {
            let end_l = digit_run_end(lhs, i);
            let end_r = digit_run_end(rhs, j);
            let ord = compare_digit_runs(&a[i..end_l], &b[j..end_r]);
            if ord != Ordering::Equal {
                return ord;
            }
            i = end_l;
            j = end_r;
        } else {
            if cl != cr {
                return cl.cmp(&cr);
            }
            i += 1;
            j += 1;
        }
    }

    (lhs.len() - i)
        .cmp(&(rhs.len() - j))
        .then_with(|| a.cmp(b))
}

/// Sorts a slice of identifiers in natural order.
pub fn natural_sort<T: AsRef<str>>(items: &mut [T]) {
    items.sort_by(|a, b| natural_cmp(a.as_ref(), b.as_ref()));
}

fn digit_run_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |offset| start + offset)
}

fn compare_digit_runs(lhs: &str, rhs: &str) -> Ordering {
    let lhs = lhs.trim_start_matches('0');
    let rhs = rhs.trim_start_matches('0');
    lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs))
}
