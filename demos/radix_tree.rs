use radix_trie::RadixTree;

fn main() -> Result<(), radix_trie::ValidationError> {
    let mut tree = RadixTree::new();
    tree.insert("ab", "1")?;
    tree.insert("a", "2")?;
    tree.insert("abd", "3")?;
    tree.insert("b", "4")?;
    print!("{}", tree.dump());

    tree.delete("c");
    tree.delete("b");
    tree.delete("ab");
    // 'b' is gone, 'ab' was merged into its only child 'abd'
    print!("{}", tree.dump());

    println!("'a' holds: {:?}", tree.get("a"));
    println!("'x' holds: {:?}", tree.get("x"));
    println!("'abd' holds: {:?}", tree.get("abd"));

    for key in ["ðom", "ðomum", "ðomulus"] {
        tree.insert(key, key)?;
    }
    println!("with prefix 'ðomu': {:?}", tree.get_all_with_prefix("ðomu"));
    for (key, value) in tree.scan_prefix("ð") {
        println!("{} {}", key, value);
    }
    println!("{} keys", tree.len());
    Ok(())
}
