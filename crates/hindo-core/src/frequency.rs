use hindo_types::FrequencyTable;

/// Count every token across all streams. Empty tokens are ignored.
pub fn aggregate<S, T>(streams: S) -> FrequencyTable
where
    S: IntoIterator,
    S::Item: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut table = FrequencyTable::new();
    for stream in streams {
        count_into(&mut table, stream);
    }
    table
}

/// Add one token stream to an existing table
pub fn count_into<I, T>(table: &mut FrequencyTable, tokens: I)
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    for token in tokens {
        let token = token.as_ref();
        if token.is_empty() {
            continue;
        }

        match table.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                table.insert(token.to_string(), 1);
            }
        }
    }
}

/// Add the counts of `other` into `table`
pub fn merge(table: &mut FrequencyTable, other: FrequencyTable) {
    for (term, count) in other {
        *table.entry(term).or_insert(0) += count;
    }
}
