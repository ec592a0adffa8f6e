use rand::Rng;
use sluice_channel::{bounded, select, ChannelError, SelectOp};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
#[cfg_attr(miri, ignore)]
fn test_mpmc_no_lost_values() {
    let producers = 4;
    let consumers = 4;
    let items_per = 500;

    let ch = Arc::new(bounded(8));
    let mut handles = vec![];

    for p in 0..producers {
        let ch = ch.clone();
        handles.push(thread::spawn(move || {
            for i in 0..items_per {
                ch.send(p * items_per + i).unwrap();
            }
        }));
    }

    let total = producers * items_per;
    let mut drains = vec![];
    for _ in 0..consumers {
        let ch = ch.clone();
        drains.push(thread::spawn(move || {
            let mut got = Vec::with_capacity(total / consumers);
            for _ in 0..total / consumers {
                got.push(ch.recv().unwrap());
            }
            got
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    let mut received: Vec<usize> = vec![];
    for d in drains {
        received.extend(d.join().unwrap());
    }

    received.sort();
    assert_eq!(received.len(), total);
    for (i, &item) in received.iter().enumerate() {
        assert_eq!(item, i);
    }

    // Everything was drained, so the channel can be torn down.
    assert!(ch.is_empty());
    ch.close().unwrap();
    let ch = Arc::try_unwrap(ch).ok().expect("all clones joined");
    assert!(ch.destroy().is_ok());
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_drains_random_producers() {
    let channels: [Arc<_>; 3] = [
        Arc::new(bounded::<usize>(4)),
        Arc::new(bounded::<usize>(4)),
        Arc::new(bounded::<usize>(4)),
    ];

    let producers = 3;
    let items_per = 200;

    let mut handles = vec![];
    for p in 0..producers {
        let channels = channels.clone();
        handles.push(thread::spawn(move || {
            let mut rng = rand::thread_rng();
            for i in 0..items_per {
                let target = rng.gen_range(0..channels.len());
                channels[target].send(p * items_per + i).unwrap();
            }
        }));
    }

    let mut received = vec![];
    while received.len() < producers * items_per {
        let mut ops = [
            SelectOp::recv(&channels[0]),
            SelectOp::recv(&channels[1]),
            SelectOp::recv(&channels[2]),
        ];
        let selected = select(&mut ops).unwrap();
        received.push(selected.value.unwrap());
    }

    for h in handles {
        h.join().unwrap();
    }

    received.sort();
    for (i, &item) in received.iter().enumerate() {
        assert_eq!(item, i);
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_close_releases_every_waiter_class() {
    // Capacity 0 blocks senders and receivers at the same time.
    let ch = Arc::new(bounded::<u32>(0));
    let mut handles = vec![];

    for _ in 0..2 {
        let ch = ch.clone();
        handles.push(thread::spawn(move || ch.send(1).unwrap_err().kind));
    }
    for _ in 0..2 {
        let ch = ch.clone();
        handles.push(thread::spawn(move || ch.recv().unwrap_err()));
    }
    {
        let ch = ch.clone();
        handles.push(thread::spawn(move || {
            let mut ops = [SelectOp::send(&ch, 2), SelectOp::recv(&ch)];
            select(&mut ops).unwrap_err().kind
        }));
    }

    thread::sleep(Duration::from_millis(100));
    ch.close().unwrap();

    for h in handles {
        assert_eq!(h.join().unwrap(), ChannelError::Closed);
    }
}
