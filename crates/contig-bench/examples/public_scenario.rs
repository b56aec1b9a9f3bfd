//! Drives a 150-byte arena through the reference walk-through, printing a
//! dump after every step.
//!
//! Run with `cargo run -p contig-bench --example public_scenario`.

use contig_arena::{Arena, ArenaError};
use contig_dump::render;
use contig_test_utils::{HELLO, PUBLIC_SCENARIO_SIZE};

fn main() -> Result<(), ArenaError> {
    let mut arena = Arena::new(PUBLIC_SCENARIO_SIZE)?;
    print!("{}", render(&arena));

    let p0 = arena.allocate(HELLO.len())?;
    arena.payload_mut(p0)?.copy_from_slice(HELLO);
    print!("{}", render(&arena));

    let p1 = arena.allocate(20)?;
    arena.payload_mut(p1)?[0] = b'!';
    print!("{}", render(&arena));

    arena.release(p0)?;
    print!("{}", render(&arena));

    let p2 = arena.allocate(std::mem::size_of::<i32>())?;
    arena
        .payload_mut(p2)?
        .copy_from_slice(&0x00EE_FFC0i32.to_ne_bytes());
    print!("{}", render(&arena));

    let p3 = arena.allocate(0)?;
    print!("{}", render(&arena));

    match arena.allocate(0) {
        Err(err @ ArenaError::NoSpace { .. }) => println!("second empty chunk: {err}"),
        Err(err) => return Err(err),
        Ok(handle) => println!("unexpected placement: {handle}"),
    }

    arena.release(p2)?;
    arena.release(p1)?;
    print!("{}", render(&arena));

    arena.release(p3)?;
    print!("{}", render(&arena));

    println!("destroying arena");
    arena.destroy();
    Ok(())
}
