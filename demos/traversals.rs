use avl_vocab::AvlTree;

fn main() {
    let mut tree = AvlTree::new();
    for value in 1..=7 {
        tree.insert(value);
    }
    tree.insert(4);

    println!("Height: {}", tree.height());
    println!("Min: {:?}, Max: {:?}", tree.find_min(), tree.find_max());

    print!("Inorder:  ");
    for value in tree.inorder() {
        print!("{value} ");
    }
    println!();

    print!("Preorder: ");
    for value in tree.preorder() {
        print!("{value} ");
    }
    println!();

    print!("Postorder: ");
    for value in tree.postorder() {
        print!("{value} ");
    }
    println!();

    if let Err(err) = tree.remove(&4) {
        println!("remove(4): {err}");
    }
}
