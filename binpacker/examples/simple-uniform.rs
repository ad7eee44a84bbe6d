use binpacker::{InputItem, MultiBinPacker};

fn main() {
    env_logger::init();

    let inputs: Vec<_> = (0..5).map(|_| InputItem::new((128, 128))).collect();

    let mut packer = MultiBinPacker::new((256, 256));
    let result = packer.pack(inputs);

    println!("Pack result: {:#?}", result);
}
